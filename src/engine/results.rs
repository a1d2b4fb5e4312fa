// 8.0.2: result types and errors for engine operations.

use crate::market::MarketError;
use crate::math::MathError;
use crate::types::{AssetId, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupResult {
    pub pool_asset: AssetId,
    pub yes_asset: AssetId,
    pub no_asset: AssetId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyResult {
    pub minted: u64,
    pub pool_outstanding: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub side: Side,
    pub amount_in: u64,
    pub tokens_out: u64,
    pub side_outstanding: u64,
    pub token_funding_reserve: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawResult {
    pub payout: u64,
    pub pool_tokens_burned: u64,
    pub pool_outstanding: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemResult {
    pub winner: Side,
    pub amount: u64,
    pub payout: u64,
    pub outstanding_remaining: u64,
}

/// Every failure an operation can report. All of these are structural
/// preconditions: the call is rejected with no state mutation, and
/// resubmission with corrected inputs is the only recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("market tokens already created")]
    AlreadyInitialized,

    #[error("market tokens not yet created")]
    NotInitialized,

    #[error("supply of {amount} below minimum increment {min_increment}")]
    BelowMinIncrement { amount: u64, min_increment: u64 },

    #[error("swap of {amount} yields zero outcome tokens")]
    InsufficientLiquidity { amount: u64 },

    #[error("swap needs {needed} outcome tokens but the reserve holds {available}")]
    ReserveExhausted { needed: u64, available: u64 },

    #[error("withdrawal of {requested} pool tokens exceeds outstanding {outstanding}")]
    InsufficientPoolTokens { requested: u64, outstanding: u64 },

    #[error("sender is not the market creator")]
    Unauthorized,

    #[error("market result already set")]
    AlreadyResolved,

    #[error("market result not yet set")]
    NotResolved,

    #[error("{0} is not the winning outcome token")]
    WrongToken(AssetId),

    #[error("redemption of {needed} exceeds the token funding reserve {available}")]
    InsufficientReserve { needed: u64, available: u64 },

    #[error("market still has {outstanding} pool tokens outstanding")]
    OutstandingLiquidity { outstanding: u64 },

    #[error("market has been closed")]
    MarketClosed,

    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] MathError),

    #[error(transparent)]
    Params(#[from] MarketError),
}
