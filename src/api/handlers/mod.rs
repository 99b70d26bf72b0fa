mod admin;
mod images;
mod users;

pub use admin::health;
pub use images::{fetch_latest_image, upload_image};
pub use users::{create_user, delete_user, get_user_credential, list_users, update_user_credential};
