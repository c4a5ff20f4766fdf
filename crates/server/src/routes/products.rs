use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use common::types::MessageResponse;
use service::catalog::{NewProduct, Product, ProductPatch};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

/// 路径中的 id 不是非负整数时不可能匹配任何记录，按 404 处理
fn parse_id(raw: &str) -> Result<u64, JsonApiError> {
    raw.parse::<u64>().map_err(|_| JsonApiError::not_found())
}

/// 列出全部商品，可按名称子串（忽略大小写）过滤
#[utoipa::path(
    get, path = "/api/products", tag = "products",
    params(("name" = Option<String>, Query, description = "Case-insensitive substring of product_name")),
    responses((status = 200, description = "OK", body = [crate::openapi::ProductDoc]), (status = 500, description = "Storage failure"))
)]
pub async fn list_products(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    state
        .catalog
        .list(query.name.as_deref())
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "Failed to fetch products"))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::NewProductDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Duplicate id"), (status = 500, description = "Storage failure"))
)]
/// 创建商品；未提供 id 时由服务端分配
pub async fn create_product(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<NewProduct>, JsonApiError>,
) -> Result<(StatusCode, Json<MessageResponse<Product>>), JsonApiError> {
    let product = state
        .catalog
        .create(input)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to create the product"))?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_product("Product created successfully", product)),
    ))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses((status = 200, description = "OK", body = crate::openapi::ProductDoc), (status = 404, description = "Product not found"), (status = 500, description = "Storage failure"))
)]
/// 获取指定商品
pub async fn get_product(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, JsonApiError> {
    let id = parse_id(&raw_id)?;
    match state.catalog.get(id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(JsonApiError::not_found()),
        Err(e) => Err(JsonApiError::from_service(e, "Failed to fetch the product")),
    }
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Product not found"), (status = 500, description = "Storage failure"))
)]
/// 部分更新指定商品（浅合并）
pub async fn update_product(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    WithRejection(Json(patch), _): WithRejection<Json<ProductPatch>, JsonApiError>,
) -> Result<Json<MessageResponse<Product>>, JsonApiError> {
    let id = parse_id(&raw_id)?;
    let product = state
        .catalog
        .update(id, patch)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to update the product"))?;
    Ok(Json(MessageResponse::with_product("Product updated successfully", product)))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Product not found"), (status = 500, description = "Storage failure"))
)]
/// 删除指定商品
pub async fn delete_product(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse<Product>>, JsonApiError> {
    let id = parse_id(&raw_id)?;
    match state.catalog.delete(id).await {
        Ok(true) => Ok(Json(MessageResponse::new("Product deleted successfully"))),
        Ok(false) => Err(JsonApiError::not_found()),
        Err(e) => Err(JsonApiError::from_service(e, "Failed to delete the product")),
    }
}
