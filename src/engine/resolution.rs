//! Resolution, redemption, and teardown.

use super::core::Engine;
use super::results::{EngineError, RedeemResult};
use crate::events::{
    EventPayload, MarketClosedEvent, MarketResolvedEvent, WinningsRedeemedEvent,
};
use crate::ledger::HostLedger;
use crate::math;
use crate::types::{Address, AssetId, Resolution, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRequest {
    pub sender: Address,
    pub winner: Side,
}

/// A validated outcome-token return accompanying a redeem call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemRequest {
    pub sender: Address,
    /// The asset the sender transferred in.
    pub asset: AssetId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    pub sender: Address,
}

impl Engine {
    /// Declare the real-world outcome. Creator only, once only.
    pub fn set_result(&mut self, req: ResultRequest) -> Result<(), EngineError> {
        let market = self.market_mut()?;
        if req.sender != market.params.creator {
            return Err(EngineError::Unauthorized);
        }
        if market.resolution.is_resolved() {
            return Err(EngineError::AlreadyResolved);
        }

        market.resolution = Resolution::from_winner(req.winner);

        self.emit_event(EventPayload::MarketResolved(MarketResolvedEvent {
            winner: req.winner,
        }));
        Ok(())
    }

    /// Redeem winning outcome tokens 2:1 against the token funding reserve.
    pub fn redeem(
        &mut self,
        ledger: &mut dyn HostLedger,
        req: RedeemRequest,
    ) -> Result<RedeemResult, EngineError> {
        let market = self.market_ref()?;
        let tokens = market.tokens.ok_or(EngineError::NotInitialized)?;
        let winner = market.resolution.winner().ok_or(EngineError::NotResolved)?;
        if req.asset != tokens.outcome(winner) {
            return Err(EngineError::WrongToken(req.asset));
        }
        let funding_asset = market.params.funding_asset;

        let r = &market.reserves;
        let payout = math::mul(req.amount, 2)?;
        if payout > r.token_funding_reserve {
            return Err(EngineError::InsufficientReserve {
                needed: payout,
                available: r.token_funding_reserve,
            });
        }
        let new_outstanding = math::sub(r.outstanding(winner), req.amount)?;
        let new_token_funding = r.token_funding_reserve - payout;

        let reserves = &mut self.market_mut()?.reserves;
        *reserves.outstanding_mut(winner) = new_outstanding;
        reserves.token_funding_reserve = new_token_funding;

        ledger.send_token(funding_asset, &req.sender, payout);

        self.emit_event(EventPayload::WinningsRedeemed(WinningsRedeemedEvent {
            sender: req.sender,
            amount: req.amount,
            payout,
            outstanding_remaining: new_outstanding,
        }));

        Ok(RedeemResult {
            winner,
            amount: req.amount,
            payout,
            outstanding_remaining: new_outstanding,
        })
    }

    /// Tear the market down. Creator only, and only once every pool token
    /// has been withdrawn.
    pub fn close(&mut self, req: CloseRequest) -> Result<(), EngineError> {
        let market = self.market_ref()?;
        if req.sender != market.params.creator {
            return Err(EngineError::Unauthorized);
        }
        let outstanding = market.reserves.pool_outstanding;
        if outstanding != 0 {
            return Err(EngineError::OutstandingLiquidity { outstanding });
        }
        let creator = market.params.creator.clone();

        self.market = None;

        self.emit_event(EventPayload::MarketClosed(MarketClosedEvent { creator }));
        Ok(())
    }
}
