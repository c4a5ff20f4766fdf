use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Human-readable outcome of a mutation, optionally carrying the affected record.
#[derive(Serialize, Debug)]
pub struct MessageResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<T>,
}

impl<T> MessageResponse<T> {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), product: None }
    }

    pub fn with_product(message: impl Into<String>, product: T) -> Self {
        Self { message: message.into(), product: Some(product) }
    }
}
