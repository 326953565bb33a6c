//! Fixture-backed implementation of [`PoDetailProvider`] and [`MaterialsLookup`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{InputMaterial, PurchaseOrder};
use crate::domain::ports::{MaterialsLookup, PoDetailProvider};

/// Fixture file layout: either a bare list or `{ purchase_orders: [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Wrapped { purchase_orders: Vec<PurchaseOrder> },
    Bare(Vec<PurchaseOrder>),
}

impl FixtureFile {
    fn into_orders(self) -> Vec<PurchaseOrder> {
        match self {
            Self::Wrapped { purchase_orders } => purchase_orders,
            Self::Bare(orders) => orders,
        }
    }
}

/// Purchase orders held in memory, keyed by id.
///
/// Records how many times each PO was fetched so callers can observe the
/// engine's lookup pattern.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseOrderStore {
    orders: HashMap<Uuid, PurchaseOrder>,
    fetches: Mutex<HashMap<Uuid, usize>>,
}

impl InMemoryPurchaseOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from purchase orders; later duplicates replace earlier ones.
    pub fn from_orders(orders: impl IntoIterator<Item = PurchaseOrder>) -> Self {
        let mut store = Self::new();
        for po in orders {
            store.insert(po);
        }
        store
    }

    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let file: FixtureFile = serde_json::from_str(json)?;
        Ok(Self::from_orders(file.into_orders()))
    }

    pub fn from_yaml_str(yaml: &str) -> DomainResult<Self> {
        let file: FixtureFile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_orders(file.into_orders()))
    }

    /// Load a fixture file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ProviderFailure(format!("failed to read {}: {e}", path.display()))
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let store = if is_yaml {
            Self::from_yaml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };
        debug!(path = %path.display(), orders = store.len(), "loaded purchase order fixture");
        Ok(store)
    }

    pub fn insert(&mut self, po: PurchaseOrder) {
        self.orders.insert(po.id, po);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// How many times `get_po_details` was called for this id.
    pub fn fetch_count(&self, po_id: Uuid) -> usize {
        self.fetches
            .lock()
            .map(|f| f.get(&po_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total `get_po_details` calls across all ids.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().map(|f| f.values().sum()).unwrap_or(0)
    }

    fn record_fetch(&self, po_id: Uuid) -> DomainResult<()> {
        let mut fetches = self
            .fetches
            .lock()
            .map_err(|e| DomainError::ProviderFailure(format!("fetch counter poisoned: {e}")))?;
        *fetches.entry(po_id).or_insert(0) += 1;
        Ok(())
    }
}

impl PoDetailProvider for InMemoryPurchaseOrderStore {
    fn get_po_details(&self, po_id: Uuid) -> DomainResult<Option<PurchaseOrder>> {
        self.record_fetch(po_id)?;
        Ok(self.orders.get(&po_id).cloned())
    }
}

impl MaterialsLookup for InMemoryPurchaseOrderStore {
    fn get_input_materials(&self, po_id: Uuid) -> DomainResult<Vec<InputMaterial>> {
        Ok(self
            .orders
            .get(&po_id)
            .map(|po| po.input_materials().to_vec())
            .unwrap_or_default())
    }
}
