//! Market setup: one-shot creation of the pool and outcome tokens.

use super::core::Engine;
use super::results::{EngineError, SetupResult};
use crate::events::{EventPayload, SetupCompletedEvent};
use crate::ledger::{HostLedger, TokenSpec};
use crate::market::TokenSet;
use crate::reserves::ReserveLedger;
use crate::types::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    pub sender: Address,
}

impl Engine {
    /// Create the three engine-controlled tokens and zero every counter.
    /// Runs exactly once: a market whose tokens already exist rejects it.
    pub fn setup(
        &mut self,
        ledger: &mut dyn HostLedger,
        req: SetupRequest,
    ) -> Result<SetupResult, EngineError> {
        if self.market_ref()?.is_initialized() {
            return Err(EngineError::AlreadyInitialized);
        }

        // creation order matches the contract: pool, no, yes
        let pool = ledger.create_token(&TokenSpec::pool());
        let no = ledger.create_token(&TokenSpec::no());
        let yes = ledger.create_token(&TokenSpec::yes());

        let market = self.market_mut()?;
        market.tokens = Some(TokenSet { pool, yes, no });
        market.reserves = ReserveLedger::new();

        self.emit_event(EventPayload::SetupCompleted(SetupCompletedEvent {
            sender: req.sender,
            pool_asset: pool,
            yes_asset: yes,
            no_asset: no,
        }));

        Ok(SetupResult {
            pool_asset: pool,
            yes_asset: yes,
            no_asset: no,
        })
    }
}
