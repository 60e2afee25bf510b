use crate::{AppConfig, routes};
use axum::{Extension, Router};
use delfos_core::store::SessionStore;
use delfos_core::winner::WinnerLedger;
use http::{Method, header};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub(crate) fn create_app(
    app_config: AppConfig,
    store: SessionStore,
    ledger: WinnerLedger,
    origins: Vec<String>,
) -> anyhow::Result<Router> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    // Without configured origins the api is open to every origin, matching a
    // public kiosk deployment; no credentials are involved either way.
    let cors = if origins.is_empty() {
        tracing::info!("allowing any origin");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(methods)
            .max_age(Duration::from_secs(3600))
    } else {
        tracing::info!(?origins, "allowing origins");
        CorsLayer::new()
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse())
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
            .allow_methods(methods)
            .max_age(Duration::from_secs(3600))
    };

    let app = Router::new()
        .merge(routes::openapi::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/questions", routes::api::v0::question::create_router())
                .nest("/sessions", routes::api::v0::session::create_router())
                .nest("/evaluations", routes::api::v0::evaluation::create_router())
                .nest("/winners", routes::api::v0::winner::create_router())
                .layer(cors),
        )
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(app_config))
                .layer(Extension(store))
                .layer(Extension(ledger)),
        )
        .with_state(());
    Ok(app)
}
