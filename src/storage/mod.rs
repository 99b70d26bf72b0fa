pub mod db;
mod images;
pub mod models;
mod tables;
mod users;

pub use db::{Database, DatabaseError};
pub use tables::*;
