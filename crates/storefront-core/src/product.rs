//! Catalog products as returned by the storefront API.
//!
//! Products are read-only input. Missing or non-string `name`/`category`
//! fields deserialize as empty strings, a malformed `brand` as no brand and a
//! `null` or unparsable `price` as zero, so malformed rows are filtered rather
//! than rejected. Only a document that is not JSON, or has no product list,
//! fails to load.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: serde_json::Value,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,

    #[serde(default, deserialize_with = "lenient_brand")]
    pub brand: Option<String>,

    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,

    /// Fields the catalog core does not interpret (stock, images, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_brand<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Numbers as-is, numeric strings parsed, anything else is 0
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()).unwrap_or_default())
}

impl Product {
    pub fn new(id: impl Into<serde_json::Value>, name: &str, category: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            category: category.to_string(),
            brand: None,
            price: 0.0,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Brand with surrounding whitespace removed, `None` when blank
    pub fn brand_name(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

/// Parse a JSON array of products, or an object with a `products` array.
///
/// Syntax errors keep serde_json's line/column. Rows that are not objects are
/// skipped with a warning.
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let rows = match serde_json::from_str::<Value>(json)? {
        Value::Array(rows) => rows,
        Value::Object(mut doc) => match doc.remove("products") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(not_a_product_list("object without a `products` array")),
        },
        _ => return Err(not_a_product_list("expected an array or an object")),
    };

    let mut products = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match Product::deserialize(row) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(row = index, error = %e, "skipping malformed product"),
        }
    }
    Ok(products)
}

fn not_a_product_list(message: &str) -> CatalogError {
    CatalogError::Json(serde::de::Error::custom(format!(
        "not a product list: {message}"
    )))
}

/// Load products from a file
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        return Err(CatalogError::ProductsNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let products = parse_products(&content)?;
    tracing::debug!(path = %path.display(), count = products.len(), "loaded products");
    Ok(products)
}

/// Load products from any reader (stdin)
pub fn read_products(mut reader: impl Read) -> Result<Vec<Product>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_products(&content)
}
