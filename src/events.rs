// 6.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems. the EventPayload enum lists
// all event types.

use crate::types::{Address, AssetId, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Lifecycle events
    MarketCreated(MarketCreatedEvent),
    SetupCompleted(SetupCompletedEvent),
    MarketResolved(MarketResolvedEvent),
    MarketClosed(MarketClosedEvent),

    // Economic events
    LiquiditySupplied(LiquiditySuppliedEvent),
    OutcomeSwapped(OutcomeSwappedEvent),
    LiquidityWithdrawn(LiquidityWithdrawnEvent),
    WinningsRedeemed(WinningsRedeemedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCreatedEvent {
    pub creator: Address,
    pub funding_asset: AssetId,
    pub min_increment: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupCompletedEvent {
    pub sender: Address,
    pub pool_asset: AssetId,
    pub yes_asset: AssetId,
    pub no_asset: AssetId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquiditySuppliedEvent {
    pub sender: Address,
    pub amount: u64,
    pub minted: u64,
    pub pool_outstanding: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSwappedEvent {
    pub sender: Address,
    pub side: Side,
    pub amount_in: u64,
    pub tokens_out: u64,
    pub side_outstanding: u64,
    pub token_funding_reserve: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityWithdrawnEvent {
    pub sender: Address,
    pub pool_tokens_burned: u64,
    pub payout: u64,
    pub pool_outstanding: u64,
    pub pool_funding_reserve: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketResolvedEvent {
    pub winner: Side,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinningsRedeemedEvent {
    pub sender: Address,
    pub amount: u64,
    pub payout: u64,
    pub outstanding_remaining: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketClosedEvent {
    pub creator: Address,
}
