// src/io/store.rs

use crate::error::{AdvisorError, Result};
use crate::model::history::{IngestReport, SalesHistory};
use crate::model::product::{Catalog, ProductName};
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Key under which each product keeps its list of sales.
const HISTORY_KEY: &str = "sales_history";

/// What a lenient load had to leave out.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub per_product: BTreeMap<String, IngestReport>,
    /// Top-level keys that were not usable product names.
    pub skipped_products: usize,
    /// Keys that trimmed to an already-loaded name and were merged into it.
    pub merged_products: usize,
}

impl LoadReport {
    pub fn skipped_records(&self) -> usize {
        self.per_product.values().map(IngestReport::skipped_count).sum()
    }
}

#[derive(Serialize)]
struct StoredProduct<'a> {
    sales_history: &'a SalesHistory,
}

/// JSON file holding every product's sales history.
///
/// Layout: `{ "<product>": { "sales_history": [ {"date", "quantity"} ] } }`.
#[derive(Debug, Clone)]
pub struct SalesStore {
    path: PathBuf,
}

impl SalesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store. A missing or empty file is an empty catalog.
    ///
    /// Individual malformed entries are skipped and reported. A file that is
    /// not a JSON object at all is an error, so it never gets overwritten by
    /// an empty save.
    pub fn load(&self) -> Result<(Catalog, LoadReport)> {
        if !self.path.exists() {
            info!("No store at '{}', starting empty", self.path.display());
            return Ok((Catalog::new(), LoadReport::default()));
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok((Catalog::new(), LoadReport::default()));
        }

        let root: Value = serde_json::from_str(&contents)?;
        let Value::Object(products) = root else {
            return Err(AdvisorError::MalformedStore(
                "top level must be an object keyed by product name".to_string(),
            ));
        };

        let mut catalog = Catalog::new();
        let mut report = LoadReport::default();

        for (raw_name, product) in &products {
            let Ok(name) = ProductName::parse(raw_name) else {
                warn!("Skipping product with empty name");
                report.skipped_products += 1;
                continue;
            };

            let entries: &[Value] = match product.get(HISTORY_KEY).and_then(Value::as_array) {
                Some(entries) => entries.as_slice(),
                None => {
                    warn!("'{}' has no usable sales history, loading it empty", name);
                    &[]
                }
            };

            let (history, mut ingest) = SalesHistory::from_raw(entries);
            if catalog.contains(name.as_str()) {
                warn!("'{}' appears under more than one key, merging its sales", name);
                report.merged_products += 1;
            }
            let replaced = catalog.merge_history(name.clone(), history);

            ingest.accepted -= replaced;
            ingest.superseded += replaced;
            let entry = report.per_product.entry(name.to_string()).or_default();
            entry.accepted += ingest.accepted;
            entry.superseded += ingest.superseded;
            entry.skipped.append(&mut ingest.skipped);
        }

        info!(
            "Loaded {} product(s) from '{}' ({} record(s) skipped)",
            catalog.len(),
            self.path.display(),
            report.skipped_records()
        );
        Ok((catalog, report))
    }

    /// Persistence cycle: prunes every history to the retention horizon,
    /// then writes the whole catalog. Returns the number of records pruned.
    pub fn save(&self, catalog: &mut Catalog, as_of: NaiveDate, retention_days: u32) -> Result<usize> {
        let pruned = catalog.prune_all(as_of, retention_days);

        let stored: BTreeMap<&str, StoredProduct<'_>> = catalog
            .iter()
            .map(|(name, history)| (name.as_str(), StoredProduct { sales_history: history }))
            .collect();

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &stored)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(
            "Saved {} product(s) to '{}' ({} record(s) pruned)",
            catalog.len(),
            self.path.display(),
            pruned
        );
        Ok(pruned)
    }
}
