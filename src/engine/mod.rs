// 8.0: the market engine. one market instance, seven operations, applied
// serially by the host ledger. deterministic with no external I/O behind
// the HostLedger seam.

mod config;
mod core;
mod liquidity;
mod resolution;
mod results;
mod setup;
mod swap;

pub use config::EngineConfig;
pub use core::Engine;
pub use liquidity::{SupplyRequest, WithdrawRequest};
pub use resolution::{CloseRequest, RedeemRequest, ResultRequest};
pub use results::{
    EngineError, RedeemResult, SetupResult, SupplyResult, SwapResult, WithdrawResult,
};
pub use setup::SetupRequest;
pub use swap::SwapRequest;
