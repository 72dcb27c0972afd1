use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Bookings", description = "Booking and table-assignment endpoints"),
        (name = "Tables", description = "Dining-table management endpoints"),
        (name = "Schedule", description = "Employee schedule endpoints"),
    ),
    info(
        title = "Booking API",
        version = "1.0.0",
        description = "Table booking and staff scheduling API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
