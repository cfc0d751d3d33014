use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::StoreError;
use super::{by_name, new_id};
use crate::core::{LineItem, amount};

/// A saved product or service with its default rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub rate: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// A line item for `quantity` units of this product at its rate.
    pub fn line_item(&self, quantity: Decimal) -> LineItem {
        let description = match &self.description {
            Some(desc) if !desc.trim().is_empty() => format!("{} - {}", self.name, desc),
            _ => self.name.clone(),
        };
        LineItem::new(description, quantity, self.rate)
    }
}

/// Product form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub rate: Decimal,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Invalid {
                entity: "product",
                message: "name must not be empty".into(),
            });
        }
        if self.rate < Decimal::ZERO {
            return Err(StoreError::Invalid {
                entity: "product",
                message: format!("rate must not be negative (got {})", self.rate),
            });
        }
        Ok(())
    }
}

/// Storage for products.
pub trait ProductRepository {
    fn create(&mut self, input: ProductInput, now: DateTime<Utc>) -> Result<Product, StoreError>;
    fn update(&mut self, id: &str, input: ProductInput) -> Result<Product, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn get(&self, id: &str) -> Result<Product, StoreError>;
    /// All products, sorted by name.
    fn list(&self) -> Result<Vec<Product>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProducts {
    products: HashMap<String, Product>,
}

impl InMemoryProducts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryProducts {
    fn create(&mut self, input: ProductInput, now: DateTime<Utc>) -> Result<Product, StoreError> {
        input.check()?;
        let product = Product {
            id: new_id(),
            name: input.name.trim().to_string(),
            description: input.description,
            rate: input.rate,
            created_at: now,
        };
        debug!(id = %product.id, name = %product.name, rate = %product.rate, "created product");
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    fn update(&mut self, id: &str, input: ProductInput) -> Result<Product, StoreError> {
        input.check()?;
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        product.name = input.name.trim().to_string();
        product.description = input.description;
        product.rate = input.rate;
        Ok(product.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    fn get(&self, id: &str) -> Result<Product, StoreError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(products)
    }
}
