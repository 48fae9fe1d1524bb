//! The registry: canonical symbol -> cell. Creation is race-free under
//! a single coarse mutex; at the cardinalities this service handles
//! (a few thousand symbols) that's cheap enough. A sharded lock or
//! lock-free map would be a drop-in optimization if contention ever
//! shows up.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::cell::{spawn_cell, CellHandle};
use crate::domain::symbol::SymbolId;

#[derive(Default)]
pub struct Registry {
    cells: Mutex<HashMap<SymbolId, CellHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `symbol`, creating its cell if this is the
    /// first reference. Concurrent calls for the same symbol always
    /// observe the same cell.
    pub fn get(&self, symbol: &SymbolId) -> CellHandle {
        let mut cells = self.cells.lock().expect("registry mutex poisoned");
        cells
            .entry(symbol.clone())
            .or_insert_with(|| spawn_cell(symbol.clone()))
            .clone()
    }

    /// A snapshot of every handle currently registered. May be stale: a
    /// concurrent `get` can create a cell not included here.
    pub fn all(&self) -> Vec<CellHandle> {
        self.cells
            .lock()
            .expect("registry mutex poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.cells.lock().expect("registry mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn get_is_idempotent_for_the_same_symbol() {
        let registry = Registry::new();
        let symbol = SymbolId::parse("AAPL").unwrap();

        let first = registry.get(&symbol);
        first.initialize(
            crate::domain::stock::RawListing {
                currency: None,
                description: None,
                display_symbol: None,
                figi: None,
                mic: None,
                symbol: "AAPL".into(),
                kind: None,
            },
            crate::domain::stock::Profile {
                name: Some("Apple Inc.".into()),
                ..Default::default()
            },
        )
        .await;

        let second = registry.get(&symbol);
        let stock = second.read().await.unwrap();
        assert_eq!(stock.name.as_deref(), Some("Apple Inc."));
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn concurrent_get_creates_exactly_one_cell() {
        let registry = Arc::new(Registry::new());
        let symbol = SymbolId::parse("MSFT").unwrap();

        let mut tasks = Vec::new();
        for _ in 0..32 {
            let registry = registry.clone();
            let symbol = symbol.clone();
            tasks.push(tokio::spawn(async move { registry.get(&symbol) }));
        }

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn all_reflects_registered_cells() {
        let registry = Registry::new();
        registry.get(&SymbolId::parse("AAPL").unwrap());
        registry.get(&SymbolId::parse("MSFT").unwrap());

        assert_eq!(registry.all().len(), 2);
    }
}
