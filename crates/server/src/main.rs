use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

mod doc;
mod dtos;
mod routes;
mod utils;

use routes::{booking, health, root, schedule, table};

#[tokio::main]
async fn main() {
    env_logger::init();

    let (router, api) = OpenApiRouter::with_openapi(doc::ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(booking::list_bookings, booking::create_booking))
        .routes(routes!(booking::update_booking, booking::delete_booking))
        .routes(routes!(booking::set_booking_status))
        .routes(routes!(booking::cancel_booking))
        .routes(routes!(booking::advance_bookings))
        .routes(routes!(table::list_tables, table::create_table))
        .routes(routes!(table::update_table, table::delete_table))
        .routes(routes!(schedule::apply_fixed_schedule))
        .routes(routes!(schedule::preview_conflicts))
        .routes(routes!(schedule::copy_schedule))
        .routes(routes!(schedule::set_day_off))
        .routes(routes!(schedule::list_schedule))
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on http://localhost:3000");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
