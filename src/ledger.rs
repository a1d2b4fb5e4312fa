//! The host ledger seam.
//!
//! Token creation and transfer are mechanical plumbing supplied by the host
//! chain; the engine only ever calls the two primitives below. `InMemoryLedger`
//! is the mocked implementation used by the simulation binary and the
//! integration tests.

use crate::types::{Address, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Total supply minted for each engine-controlled token. Large enough that
/// the market can never run out of tokens to send.
pub const TOKEN_DEFAULT_SUPPLY: u64 = 10_000_000_000_000;

/// Creation parameters for an engine-controlled token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpec {
    pub name: String,
    pub unit_name: Option<String>,
    pub total: u64,
}

impl TokenSpec {
    pub fn pool() -> Self {
        Self {
            name: "PoolToken".to_string(),
            unit_name: None,
            total: TOKEN_DEFAULT_SUPPLY,
        }
    }

    pub fn yes() -> Self {
        Self {
            name: "YesToken".to_string(),
            unit_name: Some("Yes".to_string()),
            total: TOKEN_DEFAULT_SUPPLY,
        }
    }

    pub fn no() -> Self {
        Self {
            name: "NoToken".to_string(),
            unit_name: Some("No".to_string()),
            total: TOKEN_DEFAULT_SUPPLY,
        }
    }
}

/// What the engine requires of the host ledger. Both calls are treated as
/// infallible effects: the host guarantees token creation and the engine's
/// own accounting guarantees the market never over-sends.
pub trait HostLedger: fmt::Debug {
    /// Create a token under the market's control and return its id.
    fn create_token(&mut self, spec: &TokenSpec) -> AssetId;

    /// Send `amount` of `asset` from the market's holdings to `receiver`.
    fn send_token(&mut self, asset: AssetId, receiver: &Address, amount: u64);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),
    #[error("{holder} holds {available} of {asset}, needs {requested}")]
    InsufficientBalance {
        asset: AssetId,
        holder: Address,
        available: u64,
        requested: u64,
    },
}

/// In-memory asset ledger. Tracks per-holder balances for every created
/// asset; the market account holds the full supply of engine-controlled
/// tokens at creation.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    market: Address,
    next_asset: u64,
    specs: HashMap<AssetId, TokenSpec>,
    balances: HashMap<(AssetId, Address), u64>,
}

impl InMemoryLedger {
    pub fn new(market: Address) -> Self {
        Self {
            market,
            next_asset: 1,
            specs: HashMap::new(),
            balances: HashMap::new(),
        }
    }

    pub fn market_address(&self) -> &Address {
        &self.market
    }

    /// Create an asset with its full supply credited to `holder`.
    pub fn issue_asset(&mut self, spec: TokenSpec, holder: &Address) -> AssetId {
        let asset = AssetId(self.next_asset);
        self.next_asset += 1;
        self.balances.insert((asset, holder.clone()), spec.total);
        self.specs.insert(asset, spec);
        asset
    }

    pub fn balance(&self, asset: AssetId, holder: &Address) -> u64 {
        self.balances
            .get(&(asset, holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn transfer(
        &mut self,
        asset: AssetId,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if !self.specs.contains_key(&asset) {
            return Err(LedgerError::UnknownAsset(asset));
        }
        let available = self.balance(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                holder: from.clone(),
                available,
                requested: amount,
            });
        }
        self.balances.insert((asset, from.clone()), available - amount);
        let to_balance = self.balance(asset, to);
        self.balances.insert((asset, to.clone()), to_balance + amount);
        Ok(())
    }
}

impl HostLedger for InMemoryLedger {
    fn create_token(&mut self, spec: &TokenSpec) -> AssetId {
        let holder = self.market.clone();
        self.issue_asset(spec.clone(), &holder)
    }

    fn send_token(&mut self, asset: AssetId, receiver: &Address, amount: u64) {
        let from = self.market.clone();
        // the engine's reserve accounting keeps market outflows covered
        if let Err(_err) = self.transfer(asset, &from, receiver, amount) {
            debug_assert!(false, "market over-sent: {_err}");
        }
    }
}
