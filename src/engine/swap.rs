//! Outcome-token purchase via constant-product cross-pricing.
//!
//! Buying one side prices its reserve against the other side's reserve, then
//! re-pegs the token funding reserve to twice the larger outstanding supply
//! so every outstanding token on the larger side stays redeemable at 2:1.

use super::core::Engine;
use super::results::{EngineError, SwapResult};
use crate::events::{EventPayload, OutcomeSwappedEvent};
use crate::ledger::HostLedger;
use crate::math;
use crate::types::{Address, Side};

/// A validated stablecoin deposit accompanying a swap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub sender: Address,
    pub side: Side,
    /// Stablecoin already transferred to the market by the host ledger.
    pub amount: u64,
}

impl Engine {
    pub fn swap(
        &mut self,
        ledger: &mut dyn HostLedger,
        req: SwapRequest,
    ) -> Result<SwapResult, EngineError> {
        let market = self.market_ref()?;
        let tokens = market.tokens.ok_or(EngineError::NotInitialized)?;
        if market.resolution.is_resolved() {
            // trading closes at resolution
            return Err(EngineError::AlreadyResolved);
        }

        let r = &market.reserves;
        let side_reserve = r.reserve(req.side);
        let other_reserve = r.reserve(req.side.opposite());

        let denom = math::add(other_reserve, req.amount)?;
        let tokens_out = math::mul_div(side_reserve, req.amount, denom)?;
        if tokens_out == 0 {
            return Err(EngineError::InsufficientLiquidity { amount: req.amount });
        }
        if tokens_out > side_reserve {
            return Err(EngineError::ReserveExhausted {
                needed: tokens_out,
                available: side_reserve,
            });
        }

        let new_outstanding = math::add(r.outstanding(req.side), tokens_out)?;
        let new_side_reserve = side_reserve - tokens_out;

        // re-peg the payout guarantee to the larger outstanding side
        let new_token_funding = if new_outstanding > r.outstanding(req.side.opposite()) {
            math::mul(new_outstanding, 2)?
        } else {
            r.token_funding_reserve
        };

        // the rest of the coins held (including this deposit) belong to LPs
        let total_held = math::add(r.total_funding(), req.amount)?;
        let new_pool_funding = math::sub(total_held, new_token_funding)?;

        let reserves = &mut self.market_mut()?.reserves;
        *reserves.outstanding_mut(req.side) = new_outstanding;
        *reserves.reserve_mut(req.side) = new_side_reserve;
        reserves.token_funding_reserve = new_token_funding;
        reserves.pool_funding_reserve = new_pool_funding;
        debug_assert!(reserves.token_funding_pegged());

        ledger.send_token(tokens.outcome(req.side), &req.sender, tokens_out);

        self.emit_event(EventPayload::OutcomeSwapped(OutcomeSwappedEvent {
            sender: req.sender,
            side: req.side,
            amount_in: req.amount,
            tokens_out,
            side_outstanding: new_outstanding,
            token_funding_reserve: new_token_funding,
            pool_funding_reserve: new_pool_funding,
        }));

        Ok(SwapResult {
            side: req.side,
            amount_in: req.amount,
            tokens_out,
            side_outstanding: new_outstanding,
            token_funding_reserve: new_token_funding,
            pool_funding_reserve: new_pool_funding,
        })
    }
}
