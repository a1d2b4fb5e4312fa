//! The reserve ledger: seven mutually-consistent counters owned by the market.
//!
//! `yes_reserve`/`no_reserve` are internal pricing variables, not token
//! balances. The two funding reserves partition the stablecoin actually held:
//! `token_funding_reserve` backs outcome payouts, `pool_funding_reserve` is
//! what liquidity providers can withdraw.

use crate::types::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveLedger {
    /// Pool tokens issued and not yet burned.
    pub pool_outstanding: u64,
    /// Outstanding units of each outcome token.
    pub yes_outstanding: u64,
    pub no_outstanding: u64,
    /// Pricing reserves driving the swap formula.
    pub yes_reserve: u64,
    pub no_reserve: u64,
    /// Stablecoin attributable to liquidity providers.
    pub pool_funding_reserve: u64,
    /// Stablecoin reserved to pay out the larger outstanding outcome side at 2:1.
    pub token_funding_reserve: u64,
}

impl ReserveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stablecoin the market holds. The funding partition must always
    /// sum to the coins actually received minus the coins paid out.
    pub fn total_funding(&self) -> u64 {
        self.pool_funding_reserve + self.token_funding_reserve
    }

    pub fn outstanding(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_outstanding,
            Side::No => self.no_outstanding,
        }
    }

    pub fn reserve(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_reserve,
            Side::No => self.no_reserve,
        }
    }

    pub(crate) fn outstanding_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::Yes => &mut self.yes_outstanding,
            Side::No => &mut self.no_outstanding,
        }
    }

    pub(crate) fn reserve_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::Yes => &mut self.yes_reserve,
            Side::No => &mut self.no_reserve,
        }
    }

    pub fn max_outstanding(&self) -> u64 {
        self.yes_outstanding.max(self.no_outstanding)
    }

    /// Funding-reserve peg: after every swap the token funding reserve must
    /// equal twice the larger outstanding side.
    pub fn token_funding_pegged(&self) -> bool {
        self.token_funding_reserve == 2 * self.max_outstanding()
    }
}
