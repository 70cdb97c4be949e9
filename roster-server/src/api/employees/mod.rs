//! Employee API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employee", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::delete_all),
        )
        .route("/paginated", get(handler::list_paginated))
        .route("/bulk", post(handler::bulk_create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
