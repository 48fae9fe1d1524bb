//! Per-symbol serialized state: a cell is a tiny tokio task consuming an
//! mpsc channel. Messages are processed one at a time in receive order,
//! which is what gives a cell its serialization guarantee — no locking
//! inside the cell is needed at all.

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};

use crate::domain::stock::{Profile, RawListing, Stock};
use crate::domain::symbol::SymbolId;

const CELL_MAILBOX_CAPACITY: usize = 32;

enum CellState {
    Uninitialized,
    Populated(Stock),
    Failed(String, Option<Stock>),
}

enum CellMessage {
    Read {
        reply_to: oneshot::Sender<Stock>,
    },
    Initialize {
        listing: Box<RawListing>,
        profile: Box<Profile>,
    },
    MarkFailure {
        reason: String,
    },
}

/// A cheaply-cloneable reference to a running cell. All clones address
/// the same underlying task/mailbox.
#[derive(Clone)]
pub struct CellHandle {
    symbol: SymbolId,
    tx: mpsc::Sender<CellMessage>,
}

impl CellHandle {
    pub fn symbol(&self) -> &SymbolId {
        &self.symbol
    }

    /// Send a read request and await the reply. Carries no timeout of
    /// its own — callers (the query bridge) wrap this in
    /// `tokio::time::timeout`; a timed-out read does not affect the
    /// cell, which keeps processing the message to completion.
    pub async fn read(&self) -> Result<Stock, CellGone> {
        let (reply_to, reply_rx) = oneshot::channel();
        self.tx
            .send(CellMessage::Read { reply_to })
            .await
            .map_err(|_| CellGone)?;
        reply_rx.await.map_err(|_| CellGone)
    }

    pub async fn initialize(&self, listing: RawListing, profile: Profile) {
        let _ = self
            .tx
            .send(CellMessage::Initialize {
                listing: Box::new(listing),
                profile: Box::new(profile),
            })
            .await;
    }

    pub async fn mark_failure(&self, reason: impl Into<String>) {
        let _ = self
            .tx
            .send(CellMessage::MarkFailure {
                reason: reason.into(),
            })
            .await;
    }
}

/// The cell's mailbox was dropped (its task panicked or was never
/// spawned). Cells are never expected to die during process lifetime,
/// but this is kept explicit rather than unwrapping.
#[derive(Debug, Clone, Copy)]
pub struct CellGone;

/// Spawn a new cell for `symbol` and return a handle to it.
pub fn spawn_cell(symbol: SymbolId) -> CellHandle {
    let (tx, rx) = mpsc::channel(CELL_MAILBOX_CAPACITY);
    let task_symbol = symbol.clone();
    tokio::spawn(run_cell(task_symbol, rx));
    CellHandle { symbol, tx }
}

async fn run_cell(symbol: SymbolId, mut rx: mpsc::Receiver<CellMessage>) {
    let mut state = CellState::Uninitialized;

    while let Some(message) = rx.recv().await {
        match message {
            CellMessage::Read { reply_to } => {
                let stock = match &state {
                    CellState::Uninitialized => Stock::minimum_viable(symbol.as_str(), Utc::now()),
                    CellState::Populated(stock) => stock.clone(),
                    CellState::Failed(_, Some(stock)) => stock.clone(),
                    CellState::Failed(_, None) => Stock::minimum_viable(symbol.as_str(), Utc::now()),
                };
                let _ = reply_to.send(stock);
            }
            CellMessage::Initialize { listing, profile } => {
                let stock = Stock::combine(&listing, &profile, Utc::now());
                state = CellState::Populated(stock);
            }
            CellMessage::MarkFailure { reason } => {
                let last_known = match state {
                    CellState::Populated(stock) => Some(stock),
                    CellState::Failed(_, stock) => stock,
                    CellState::Uninitialized => None,
                };
                state = CellState::Failed(reason, last_known);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(symbol: &str) -> RawListing {
        RawListing {
            currency: None,
            description: None,
            display_symbol: None,
            figi: None,
            mic: None,
            symbol: symbol.to_string(),
            kind: None,
        }
    }

    #[tokio::test]
    async fn uninitialized_read_synthesizes_minimum_viable() {
        let handle = spawn_cell(SymbolId::parse("ZZZZ").unwrap());
        let stock = handle.read().await.unwrap();
        assert_eq!(stock.symbol, "ZZZZ");
        assert!(stock.name.is_none());
    }

    #[tokio::test]
    async fn initialize_then_read_returns_populated_stock() {
        let handle = spawn_cell(SymbolId::parse("AAPL").unwrap());
        let profile = Profile {
            name: Some("Apple Inc.".into()),
            ..Default::default()
        };
        handle.initialize(listing("AAPL"), profile).await;

        let stock = handle.read().await.unwrap();
        assert_eq!(stock.name.as_deref(), Some("Apple Inc."));
    }

    #[tokio::test]
    async fn mark_failure_preserves_last_known_stock() {
        let handle = spawn_cell(SymbolId::parse("MSFT").unwrap());
        let profile = Profile {
            name: Some("Microsoft Corporation".into()),
            ..Default::default()
        };
        handle.initialize(listing("MSFT"), profile).await;
        handle.mark_failure("upstream 500").await;

        let stock = handle.read().await.unwrap();
        assert_eq!(stock.name.as_deref(), Some("Microsoft Corporation"));
    }

    #[tokio::test]
    async fn mark_failure_with_no_prior_stock_falls_back_to_minimum_viable() {
        let handle = spawn_cell(SymbolId::parse("NFLX").unwrap());
        handle.mark_failure("never initialized").await;

        let stock = handle.read().await.unwrap();
        assert_eq!(stock.symbol, "NFLX");
        assert!(stock.name.is_none());
    }

    #[tokio::test]
    async fn failure_then_successful_initialize_returns_to_populated() {
        let handle = spawn_cell(SymbolId::parse("TSLA").unwrap());
        handle.mark_failure("first attempt failed").await;
        handle
            .initialize(
                listing("TSLA"),
                Profile {
                    name: Some("Tesla, Inc.".into()),
                    ..Default::default()
                },
            )
            .await;

        let stock = handle.read().await.unwrap();
        assert_eq!(stock.name.as_deref(), Some("Tesla, Inc."));
    }
}
