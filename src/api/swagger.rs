use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "Stores schema-less user records in MongoDB and enriches the listing endpoint with data from the companion forecast service.\n\n**Endpoints:**\n- Add a user record (any JSON object)\n- List all user records together with the current forecast\n- Health monitoring and metrics"
    ),
    paths(
        // Users
        crate::api::users::add_user,
        crate::api::users::get_users,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::services::user_service::UserAddedResponse,
            crate::services::user_service::UsersResponse,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Users", description = "User record ingestion and listing. Records are opaque JSON objects; the listing is enriched with the current forecast."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
