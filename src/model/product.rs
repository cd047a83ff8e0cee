// src/model/product.rs

use crate::error::{AdvisorError, Result};
use crate::model::history::{SalesHistory, UpsertOutcome};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// A trimmed, non-empty, case-sensitive product name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductName(String);

impl ProductName {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdvisorError::InvalidProductName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every known product and its sales history, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: BTreeMap<ProductName, SalesHistory>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product with an empty history.
    pub fn create_product(&mut self, raw_name: &str) -> Result<ProductName> {
        let name = ProductName::parse(raw_name)?;
        if self.products.contains_key(&name) {
            return Err(AdvisorError::ProductExists(name.0));
        }
        self.products.insert(name.clone(), SalesHistory::new());
        Ok(name)
    }

    /// Adds a product's history, merging it into the existing history when
    /// the name is already known. Returns how many existing records the
    /// incoming ones replaced.
    pub fn merge_history(&mut self, name: ProductName, history: SalesHistory) -> usize {
        match self.products.get_mut(&name) {
            Some(existing) => existing.merge(history),
            None => {
                self.products.insert(name, history);
                0
            }
        }
    }

    pub fn get(&self, raw_name: &str) -> Result<&SalesHistory> {
        let name = ProductName::parse(raw_name)?;
        self.products
            .get(&name)
            .ok_or(AdvisorError::UnknownProduct(name.0))
    }

    pub fn get_mut(&mut self, raw_name: &str) -> Result<&mut SalesHistory> {
        let name = ProductName::parse(raw_name)?;
        self.products
            .get_mut(&name)
            .ok_or(AdvisorError::UnknownProduct(name.0))
    }

    pub fn contains(&self, raw_name: &str) -> bool {
        ProductName::parse(raw_name)
            .map(|name| self.products.contains_key(&name))
            .unwrap_or(false)
    }

    /// Records a sale for an existing product. Unknown products are not
    /// created implicitly.
    pub fn record_sale(
        &mut self,
        raw_name: &str,
        date: NaiveDate,
        quantity: i64,
    ) -> Result<UpsertOutcome> {
        self.get_mut(raw_name)?.upsert(date, quantity)
    }

    pub fn product_names(&self) -> Vec<&ProductName> {
        self.products.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductName, &SalesHistory)> {
        self.products.iter()
    }

    /// Prunes every history; returns the total number of records removed.
    pub fn prune_all(&mut self, as_of: NaiveDate, horizon_days: u32) -> usize {
        self.products
            .values_mut()
            .map(|history| history.prune(as_of, horizon_days))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
