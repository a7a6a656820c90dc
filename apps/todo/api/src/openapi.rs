use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo items: paginated listing, create, update and delete"
    ),
    nest(
        (path = "/todo/api", api = domain_items::ApiDoc)
    )
)]
pub struct ApiDoc;
