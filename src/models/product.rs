use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::Sku;
use super::quantity::Quantity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: Sku,
    pub average_weight: Quantity,
}

/// Products indexed by sku, built once per request.
pub type ProductCatalog = HashMap<Sku, Product>;

pub fn index_catalog(products: Vec<Product>) -> ProductCatalog {
    products.into_iter().map(|p| (p.sku.clone(), p)).collect()
}
