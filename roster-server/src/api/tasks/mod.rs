//! Task API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Task router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/task", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .put(handler::bulk_update)
                .delete(handler::delete_all),
        )
        .route("/bulk", post(handler::bulk_create))
        .route("/employee/{id}", get(handler::list_by_employee))
        .route("/employee/{id}/monthly", get(handler::monthly))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
