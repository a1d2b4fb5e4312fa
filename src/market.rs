//! Market parameters and the root market entity.
//!
//! A market represents a single binary-outcome event: one funding stablecoin,
//! one liquidity pool token, and a complementary yes/no token pair.

use crate::reserves::ReserveLedger;
use crate::types::{Address, AssetId, Resolution, Side};
use serde::{Deserialize, Serialize};

/// Static market parameters (immutable after creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Account authorized to set the result and close the market.
    pub creator: Address,
    /// The stablecoin accepted as funding.
    pub funding_asset: AssetId,
    /// Minimum stablecoin amount per liquidity supply.
    pub min_increment: u64,
}

impl MarketParams {
    pub fn new(creator: Address, funding_asset: AssetId, min_increment: u64) -> Self {
        Self {
            creator,
            funding_asset,
            min_increment,
        }
    }

    pub fn validate(&self) -> Result<(), MarketError> {
        if self.min_increment == 0 {
            return Err(MarketError::ZeroMinIncrement);
        }
        Ok(())
    }
}

/// The three engine-controlled tokens, created once by setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub pool: AssetId,
    pub yes: AssetId,
    pub no: AssetId,
}

impl TokenSet {
    pub fn outcome(&self, side: Side) -> AssetId {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }
}

/// The root entity. Created once, mutated by every operation, destroyed only
/// by close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub params: MarketParams,
    /// `None` until setup has created the tokens.
    pub tokens: Option<TokenSet>,
    pub resolution: Resolution,
    pub reserves: ReserveLedger,
}

impl Market {
    pub fn new(params: MarketParams) -> Self {
        Self {
            params,
            tokens: None,
            resolution: Resolution::Unresolved,
            reserves: ReserveLedger::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.tokens.is_some()
    }

    /// The asset redeemable after resolution, if any.
    pub fn winner_asset(&self) -> Option<AssetId> {
        let tokens = self.tokens?;
        self.resolution.winner().map(|side| tokens.outcome(side))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("min increment must be positive")]
    ZeroMinIncrement,
}
