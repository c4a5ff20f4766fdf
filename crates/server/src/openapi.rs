use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: u64,
    pub product_name: String,
    pub image: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(ToSchema)]
pub struct NewProductDoc {
    /// Omit to get `max(existing id) + 1`.
    pub id: Option<u64>,
    pub product_name: String,
    pub image: Option<String>,
    pub price: f64,
    pub quantity: u32,
}

#[derive(ToSchema)]
pub struct ProductPatchDoc {
    /// Must equal the path id when present.
    pub id: Option<u64>,
    pub product_name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list_products,
        crate::routes::products::create_product,
        crate::routes::products::get_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            NewProductDoc,
            ProductPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products", description = "Product catalog CRUD"),
    )
)]
pub struct ApiDoc;
