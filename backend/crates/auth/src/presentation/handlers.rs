//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::UserId;
use kernel::pagination::{Page, PageQuery};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{CreateUserInput, LoginInput, LoginUseCase, UpdateUserInput, UserService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn users(&self) -> UserService<R> {
        UserService::new(self.repo.clone(), self.config.clone())
    }
}

/// Path ids that are not UUIDs cannot match any user
fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

// ============================================================================
// Users
// ============================================================================

/// POST /users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .users()
        .create(CreateUserInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users?page&size
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<PageQuery>,
) -> AuthResult<Json<Page<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let page = state.users().list(query.resolve()).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = state.users().get(&user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = state
        .users()
        .update(
            &user_id,
            UpdateUserInput {
                full_name: req.full_name,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if let Ok(user_id) = id.parse::<UserId>() {
        state.users().delete(&user_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
