//! Liquidity supply and withdrawal.
//!
//! Supply mints pool tokens against a stablecoin deposit and seeds a quarter
//! of the deposit into each pricing reserve, weighted by the current yes/no
//! skew. Withdraw pays out the sender's proportional share and, while the
//! market is unresolved, shrinks the pricing reserves as the mirror image.

use super::core::Engine;
use super::results::{EngineError, SupplyResult, WithdrawResult};
use crate::events::{EventPayload, LiquiditySuppliedEvent, LiquidityWithdrawnEvent};
use crate::ledger::HostLedger;
use crate::math;
use crate::types::Address;

/// A validated stablecoin deposit accompanying a supply call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyRequest {
    pub sender: Address,
    /// Stablecoin already transferred to the market by the host ledger.
    pub amount: u64,
}

/// A validated pool-token return accompanying a withdraw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub sender: Address,
    /// Pool tokens already transferred back to the market.
    pub pool_token_amount: u64,
}

impl Engine {
    pub fn supply(
        &mut self,
        ledger: &mut dyn HostLedger,
        req: SupplyRequest,
    ) -> Result<SupplyResult, EngineError> {
        let market = self.market_ref()?;
        let tokens = market.tokens.ok_or(EngineError::NotInitialized)?;
        if req.amount < market.params.min_increment {
            return Err(EngineError::BelowMinIncrement {
                amount: req.amount,
                min_increment: market.params.min_increment,
            });
        }

        let r = &market.reserves;

        // skew ratio from the pre-deposit reserves
        let ratio = math::seed_ratio(r.no_reserve, r.yes_reserve)?;

        // first deposit pegs 1:1; later deposits dilute proportionally
        let minted = if r.pool_funding_reserve > 0 {
            math::mul_div(req.amount, r.pool_outstanding, r.pool_funding_reserve)?
        } else {
            req.amount
        };

        // a quarter of the deposit seeds each side, weighted by the skew.
        // amounts under 4 floor to zero reserve growth.
        let quarter = req.amount / 4;
        let new_no_reserve = math::add(r.no_reserve, math::mul(ratio, quarter)?)?;
        let new_yes_reserve = math::add(r.yes_reserve, math::div(quarter, ratio)?)?;
        let new_pool_outstanding = math::add(r.pool_outstanding, minted)?;
        let new_pool_funding = math::add(r.pool_funding_reserve, req.amount)?;

        let reserves = &mut self.market_mut()?.reserves;
        reserves.pool_outstanding = new_pool_outstanding;
        reserves.no_reserve = new_no_reserve;
        reserves.yes_reserve = new_yes_reserve;
        reserves.pool_funding_reserve = new_pool_funding;

        ledger.send_token(tokens.pool, &req.sender, minted);

        self.emit_event(EventPayload::LiquiditySupplied(LiquiditySuppliedEvent {
            sender: req.sender,
            amount: req.amount,
            minted,
            pool_outstanding: new_pool_outstanding,
            pool_funding_reserve: new_pool_funding,
        }));

        Ok(SupplyResult {
            minted,
            pool_outstanding: new_pool_outstanding,
            pool_funding_reserve: new_pool_funding,
        })
    }

    pub fn withdraw(
        &mut self,
        ledger: &mut dyn HostLedger,
        req: WithdrawRequest,
    ) -> Result<WithdrawResult, EngineError> {
        let market = self.market_ref()?;
        if !market.is_initialized() {
            return Err(EngineError::NotInitialized);
        }
        let funding_asset = market.params.funding_asset;
        let resolved = market.resolution.is_resolved();

        let r = &market.reserves;
        if r.pool_outstanding == 0 || req.pool_token_amount > r.pool_outstanding {
            return Err(EngineError::InsufficientPoolTokens {
                requested: req.pool_token_amount,
                outstanding: r.pool_outstanding,
            });
        }

        let payout = math::mul_div(r.pool_funding_reserve, req.pool_token_amount, r.pool_outstanding)?;

        // pricing reserves shrink only while the market still trades; after
        // resolution only the payout accounting matters
        let (new_yes_reserve, new_no_reserve) = if resolved {
            (r.yes_reserve, r.no_reserve)
        } else {
            let ratio = math::seed_ratio(r.no_reserve, r.yes_reserve)?;
            let base = payout / 4;
            let no_shrink = math::mul(base, ratio)?;
            let yes_shrink = math::div(base, ratio)?;
            // a heavily one-sided market can price the shrink past what a
            // reserve still holds; the floor is zero
            (
                r.yes_reserve.saturating_sub(yes_shrink),
                r.no_reserve.saturating_sub(no_shrink),
            )
        };

        let new_pool_funding = math::sub(r.pool_funding_reserve, payout)?;
        let new_pool_outstanding = r.pool_outstanding - req.pool_token_amount;

        let reserves = &mut self.market_mut()?.reserves;
        reserves.pool_funding_reserve = new_pool_funding;
        reserves.pool_outstanding = new_pool_outstanding;
        reserves.yes_reserve = new_yes_reserve;
        reserves.no_reserve = new_no_reserve;

        ledger.send_token(funding_asset, &req.sender, payout);

        self.emit_event(EventPayload::LiquidityWithdrawn(LiquidityWithdrawnEvent {
            sender: req.sender,
            pool_tokens_burned: req.pool_token_amount,
            payout,
            pool_outstanding: new_pool_outstanding,
            pool_funding_reserve: new_pool_funding,
        }));

        Ok(WithdrawResult {
            payout,
            pool_tokens_burned: req.pool_token_amount,
            pool_outstanding: new_pool_outstanding,
            pool_funding_reserve: new_pool_funding,
        })
    }
}
