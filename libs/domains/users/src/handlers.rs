use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, PasswordCheck, SanitizedUser, UpdateUser};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints.
///
/// Every success is a plain 200 with a fixed human-readable `message`
/// field next to the payload.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/password-check", post(password_check))
        .with_state(shared_service)
}

/// Sanitized user payload plus the endpoint's fixed message
#[derive(Debug, Serialize)]
struct UserResponse {
    #[serde(flatten)]
    user: SanitizedUser,
    message: &'static str,
}

/// List response
#[derive(Debug, Serialize)]
struct ListUsersResponse {
    data: Vec<SanitizedUser>,
    message: &'static str,
}

/// Message-only response (delete, password-check)
#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Create a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<CreateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.create_user(input).await?;
    Ok(Json(UserResponse {
        user,
        message: "create user: ok",
    }))
}

/// Get a user by ID
///
/// GET /users/:id
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(UserResponse {
        user,
        message: "find user: ok",
    }))
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<ListUsersResponse>> {
    let users = service.list_users().await?;
    Ok(Json(ListUsersResponse {
        data: users,
        message: "read all users: ok",
    }))
}

/// Update a user
///
/// PUT /users/:id
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(UserResponse {
        user,
        message: "update user: ok",
    }))
}

/// Delete a user
///
/// DELETE /users/:id
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<Uuid>,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(id).await?;
    Ok(Json(MessageResponse {
        message: "delete user: ok",
    }))
}

/// Check a username/password pair
///
/// POST /password-check
///
/// A wrong password maps to 401, an unknown username to 500.
async fn password_check<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<PasswordCheck>,
) -> UserResult<Json<MessageResponse>> {
    let ok = service.pass_check(&input.username, &input.password).await?;

    if !ok {
        return Err(UserError::WrongPassword);
    }

    Ok(Json(MessageResponse {
        message: "auth check: ok",
    }))
}
