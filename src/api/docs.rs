//! OpenAPI document for the JSON endpoints.

use utoipa::OpenApi;

use super::handlers::{ErrorResponse, HealthResponse};
use crate::directory::{AnnotatedProvider, FilterOptions, NetworkStatus, Plan, Provider, SearchRequest};

/// OpenAPI description served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Provider Directory API"),
    paths(super::handlers::health, super::handlers::filters, super::handlers::search),
    components(schemas(
        AnnotatedProvider,
        ErrorResponse,
        FilterOptions,
        HealthResponse,
        NetworkStatus,
        Plan,
        Provider,
        SearchRequest
    )),
    tags(
        (name = "directory", description = "Provider search and filter values"),
        (name = "service", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;
