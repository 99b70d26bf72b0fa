use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, AppQuery, JSend};
use crate::auth;
use crate::storage::models::{CredentialRecord, UserWithCredential};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub password: String,
    pub internet: CredentialPayload,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CredentialPayload {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCredentialParams {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub name: String,
    pub internet: Option<CredentialResponse>,
}

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub detail: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users/ -- create a user and its internet credential in one shot.
///
/// The account password is hashed before it reaches the store and never
/// appears in any response.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<Json<JSend<UserResponse>>, ApiError> {
    let password_hash =
        auth::hash_password(&req.password).map_err(|e| ApiError::internal(e.to_string()))?;

    let (user, credential) = state
        .db
        .create_user_with_credential(
            &req.name,
            &password_hash,
            &req.internet.name,
            &req.internet.password,
        )
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::bad_request("User already exists"))?;

    tracing::debug!(user = %user.name, "Created user");

    Ok(JSend::success(UserResponse {
        name: user.name,
        internet: Some(credential_to_response(&credential)),
    }))
}

/// GET /users/:name/internet -- return the credential held for a user.
pub async fn get_user_credential(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<JSend<CredentialResponse>>, ApiError> {
    let user = state
        .db
        .get_user_by_name(&name)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let credential = state
        .db
        .get_credential_for_user(user.id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("No internet credential for this user"))?;

    Ok(JSend::success(credential_to_response(&credential)))
}

/// PUT /users/internet?name=&password= -- overwrite the caller's credential.
pub async fn update_user_credential(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<UpdateCredentialParams>,
    AppJson(req): AppJson<CredentialPayload>,
) -> Result<Json<JSend<CredentialResponse>>, ApiError> {
    let user = state
        .db
        .get_user_by_name(&params.name)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    // One message for both failure modes: the response must not reveal
    // whether the name or the password was wrong.
    let user = match user {
        Some(user) if auth::verify_password(&user.password_hash, &params.password) => user,
        _ => return Err(ApiError::not_found("User not found or incorrect password")),
    };

    let updated = state
        .db
        .update_credential(user.id, &req.name, &req.password)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("No internet credential for this user"))?;

    tracing::debug!(user = %user.name, "Updated credential");
    Ok(JSend::success(credential_to_response(&updated)))
}

/// DELETE /users/:name -- remove a user and its credential together.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<JSend<DeleteUserResponse>>, ApiError> {
    let deleted = state
        .db
        .delete_user(&name)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::debug!(user = %name, "Deleted user");
    Ok(JSend::success(DeleteUserResponse {
        detail: "User deleted".to_string(),
    }))
}

/// GET /users/ -- every user with its credential, in creation order.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JSend<Vec<UserResponse>>>, ApiError> {
    let users = state
        .db
        .list_users()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let items: Vec<UserResponse> = users.iter().map(user_to_response).collect();
    Ok(JSend::success(items))
}

// ============================================================================
// Helpers
// ============================================================================

fn user_to_response(entry: &UserWithCredential) -> UserResponse {
    UserResponse {
        name: entry.user.name.clone(),
        internet: entry.credential.as_ref().map(credential_to_response),
    }
}

fn credential_to_response(credential: &CredentialRecord) -> CredentialResponse {
    CredentialResponse {
        name: credential.name.clone(),
        password: credential.password.clone(),
    }
}
