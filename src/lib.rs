// amm-core: binary outcome prediction market AMM engine.
// reserve-accounting first architecture: the funding partition invariant
// takes priority. all computation is deterministic, applied serially by the
// host ledger, with no external I/O behind the HostLedger seam.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Address, AssetId, Side, Resolution, Timestamp
//   2.x  math.rs: checked u64 integer-ratio arithmetic
//   3.x  reserves.rs: the reserve ledger: outstanding counters + funding partition
//   4.x  market.rs: market params, token set, root entity
//   5.x  ledger.rs: host ledger seam (mocked in-memory implementation)
//   6.x  events.rs: state transition events for audit
//   7.x  pricing.rs: read-side odds and swap quoting
//   8.x  engine/: the seven operations: setup, supply, swap, withdraw,
//        result, redeem, close

// core engine modules
pub mod engine;
pub mod market;
pub mod math;
pub mod reserves;
pub mod types;

// integration modules
pub mod events;
pub mod ledger;
pub mod pricing;

// re exports for convenience
pub use engine::*;
pub use events::*;
pub use market::*;
pub use reserves::*;
pub use types::*;
pub use ledger::{HostLedger, InMemoryLedger, LedgerError, TokenSpec, TOKEN_DEFAULT_SUPPLY};
pub use math::MathError;
pub use pricing::{implied_odds, spot_price, swap_preview, ImpliedOdds, SwapQuote};
