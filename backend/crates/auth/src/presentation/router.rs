//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, config, tokens)
}

/// Create a generic Auth router for any repository implementation
///
/// `POST /login` and `POST /users` are public; every other route passes
/// through the bearer-token gate.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let gate = AuthGateState::new(tokens.clone());
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens,
    };

    let public = Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/users", post(handlers::create_user::<R>));

    let protected = Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .patch(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_auth));

    public.merge(protected).with_state(state)
}
