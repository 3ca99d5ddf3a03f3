//! Directory Router

use auth::{AuthGateState, require_auth};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::DirectoryConfig;
use crate::infra::postgres::PgDirectoryRepository;
use crate::presentation::handlers::{self, DirectoryAppState, DirectoryStore};

/// Create the Directory router with PostgreSQL repository
pub fn directory_router(
    repo: PgDirectoryRepository,
    config: DirectoryConfig,
    gate: AuthGateState,
) -> Router {
    directory_router_generic(repo, config, gate)
}

/// Create a generic Directory router for any repository implementation
///
/// Every route passes through the bearer-token gate.
pub fn directory_router_generic<R>(repo: R, config: DirectoryConfig, gate: AuthGateState) -> Router
where
    R: DirectoryStore,
{
    let state = DirectoryAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        // Companies
        .route("/companies", post(handlers::create_company::<R>))
        .route(
            "/companies/{id}",
            get(handlers::get_company::<R>)
                .patch(handlers::update_company::<R>)
                .delete(handlers::delete_company::<R>),
        )
        // Departments
        .route("/departments", post(handlers::create_department::<R>))
        .route(
            "/departments/{id}",
            get(handlers::list_departments::<R>)
                .patch(handlers::update_department::<R>)
                .delete(handlers::delete_department::<R>),
        )
        // Positions
        .route(
            "/positions",
            post(handlers::create_position::<R>).get(handlers::search_positions::<R>),
        )
        .route(
            "/positions/{id}",
            get(handlers::get_position::<R>)
                .patch(handlers::update_position::<R>)
                .delete(handlers::delete_position::<R>),
        )
        // Employees
        .route(
            "/employees",
            post(handlers::create_employee::<R>).get(handlers::list_employees::<R>),
        )
        .route(
            "/employees/{id}",
            get(handlers::get_employee::<R>)
                .patch(handlers::update_employee::<R>)
                .delete(handlers::delete_employee::<R>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}
