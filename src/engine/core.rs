// 8.1 engine/core.rs: the engine struct. holds the market, the event log,
// and the externally driven clock. operations live in the sibling files and
// take the host ledger as an explicit effect channel, so every operation is
// (state, validated input) -> (new state, effects) with nothing hidden.

use super::config::EngineConfig;
use super::results::EngineError;
use crate::events::{Event, EventId, EventPayload, MarketCreatedEvent};
use crate::market::{Market, MarketParams};
use crate::reserves::ReserveLedger;
use crate::types::Timestamp;

#[derive(Debug)]
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) market: Option<Market>,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    /// Create the market. The only operation that cannot be replayed: the
    /// engine exists because the market does.
    pub fn create(config: EngineConfig, params: MarketParams) -> Result<Self, EngineError> {
        params.validate()?;

        let created = MarketCreatedEvent {
            creator: params.creator.clone(),
            funding_asset: params.funding_asset,
            min_increment: params.min_increment,
        };

        let mut engine = Self {
            config,
            market: Some(Market::new(params)),
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        };
        engine.emit_event(EventPayload::MarketCreated(created));
        Ok(engine)
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    /// `None` once the market has been closed.
    pub fn market(&self) -> Option<&Market> {
        self.market.as_ref()
    }

    pub fn reserves(&self) -> Option<&ReserveLedger> {
        self.market.as_ref().map(|m| &m.reserves)
    }

    pub(super) fn market_ref(&self) -> Result<&Market, EngineError> {
        self.market.as_ref().ok_or(EngineError::MarketClosed)
    }

    pub(super) fn market_mut(&mut self) -> Result<&mut Market, EngineError> {
        self.market.as_mut().ok_or(EngineError::MarketClosed)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
