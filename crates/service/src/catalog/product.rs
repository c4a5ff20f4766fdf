use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// One catalog record as persisted in the products file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub product_name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub quantity: u32,
}

/// Create payload. `id` may be pre-assigned by the caller; when absent the
/// service assigns `max(existing) + 1`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<u64>,
    pub product_name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub quantity: u32,
}

/// Update payload: only the fields that are present get overwritten.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("product_name must not be empty".into()));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), ServiceError> {
    if image.is_empty() {
        return Ok(());
    }
    if !(image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/')) {
        return Err(ServiceError::Validation("image must be an http(s) URL or an absolute path".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ServiceError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ServiceError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_name(&self.product_name)?;
        validate_image(&self.image)?;
        validate_price(self.price)
    }

    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            product_name: self.product_name,
            image: self.image,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl ProductPatch {
    /// Check the present fields. `path_id` is the id the patch targets; a
    /// body id, if given, has to agree with it.
    pub fn validate(&self, path_id: u64) -> Result<(), ServiceError> {
        if let Some(id) = self.id {
            if id != path_id {
                return Err(ServiceError::Validation(format!("body id {} does not match path id {}", id, path_id)));
            }
        }
        if let Some(name) = &self.product_name {
            validate_name(name)?;
        }
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Shallow merge onto `product`. The id is never changed.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.product_name {
            product.product_name = name;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}
