use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{categories, expenditures, projects, reports, subcategories};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_one)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            axum::routing::put(categories::update).delete(categories::delete),
        )
        .route(
            "/subCategories",
            get(subcategories::list).post(subcategories::create),
        )
        .route(
            "/subCategories/{id}",
            axum::routing::put(subcategories::update).delete(subcategories::delete),
        )
        .route(
            "/expenditures",
            get(expenditures::list).post(expenditures::create),
        )
        .route(
            "/expenditures/{id}",
            get(expenditures::get_one)
                .put(expenditures::update)
                .delete(expenditures::delete),
        )
        .route("/reports/budget-vs-spend", get(reports::budget_vs_spend))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
