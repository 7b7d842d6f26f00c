use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::types::ResolvedMarket;

/// Process-lifetime cache of resolved markets, keyed by market code.
///
/// Entries are never invalidated. Two requests resolving the same code at the
/// same time may both miss and both insert; the second write replaces the
/// first with an equivalent record.
#[derive(Debug, Default)]
pub struct MarketCache {
    entries: Mutex<HashMap<String, ResolvedMarket>>,
}

impl MarketCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, code: &str) -> Option<ResolvedMarket> {
        self.entries.lock().await.get(code).cloned()
    }

    pub async fn insert(&self, market: ResolvedMarket) {
        self.entries
            .lock()
            .await
            .insert(market.code.clone(), market);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
