use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ApiQuery, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{Item, ListParams, Page, SaveItem, SaveParams, SortDirection, SortField};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, save_item, get_item, delete_item),
    components(
        schemas(Item, Page, SaveItem, SortField, SortDirection),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Items", description = "Todo item endpoints")
    )
)]
pub struct ApiDoc;

/// Create the items router; mount it under the service base path
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/items", get(list_items).post(save_item))
        .route("/items/", get(list_items).post(save_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .with_state(shared_service)
}

/// List one page of items
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    params(ListParams),
    responses(
        (status = 200, description = "One page of items", body = Page),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ItemResult<Json<Page>> {
    let page = service.list_items(params).await?;
    Ok(Json(page))
}

/// Create an item, or update it when an id is given
///
/// Fields may come from the JSON body or the query string. A non-empty query value
/// takes precedence over the same body field.
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    params(SaveParams),
    request_body = SaveItem,
    responses(
        (status = 200, description = "Item saved", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn save_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ApiQuery(params): ApiQuery<SaveParams>,
    ValidatedJson(input): ValidatedJson<SaveItem>,
) -> ItemResult<Json<Item>> {
    let item = service.save_item(input.with_params(params)).await?;
    Ok(Json(item))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Delete an item, returning it as it was
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.delete_item(id).await?;
    Ok(Json(item))
}
