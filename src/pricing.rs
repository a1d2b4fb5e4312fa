//! Read-side quoting: implied odds and swap previews derived from reserve
//! state. Everything here is a pure function over a `ReserveLedger` snapshot;
//! nothing feeds back into the engine's u64 accounting.

use crate::math;
use crate::reserves::ReserveLedger;
use crate::types::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized probabilities implied by the pricing reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpliedOdds {
    pub yes: Decimal,
    pub no: Decimal,
}

/// Marginal stablecoin price of one outcome token on `side`: the limit of
/// `amount / tokens_out` as the trade size goes to zero, which is
/// `other_reserve / side_reserve`. `None` when the side reserve is empty.
pub fn spot_price(reserves: &ReserveLedger, side: Side) -> Option<Decimal> {
    let side_reserve = reserves.reserve(side);
    if side_reserve == 0 {
        return None;
    }
    let other_reserve = reserves.reserve(side.opposite());
    Some(Decimal::from(other_reserve) / Decimal::from(side_reserve))
}

/// Odds from the relative spot prices of the two sides, normalized to sum
/// to one. `None` before the pool holds any pricing reserves.
pub fn implied_odds(reserves: &ReserveLedger) -> Option<ImpliedOdds> {
    let yes = Decimal::from(reserves.yes_reserve);
    let no = Decimal::from(reserves.no_reserve);
    if yes.is_zero() && no.is_zero() {
        return None;
    }
    // price_yes ∝ no/yes and price_no ∝ yes/no, so the normalized weights
    // reduce to no² and yes²
    let denom = yes * yes + no * no;
    Some(ImpliedOdds {
        yes: no * no / denom,
        no: yes * yes / denom,
    })
}

/// A read-only preview of a swap at current reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub side: Side,
    pub amount_in: u64,
    /// Exactly what the engine would mint, same integer arithmetic.
    pub tokens_out: u64,
    /// Stablecoin paid per token received.
    pub effective_price: Decimal,
    /// Fractional slippage versus the spot price.
    pub price_impact: Decimal,
}

/// Quote a swap without touching state. `None` when the swap would be
/// rejected (zero output or exhausted reserve).
pub fn swap_preview(reserves: &ReserveLedger, side: Side, amount_in: u64) -> Option<SwapQuote> {
    if amount_in == 0 {
        return None;
    }
    let side_reserve = reserves.reserve(side);
    let other_reserve = reserves.reserve(side.opposite());
    let denom = math::add(other_reserve, amount_in).ok()?;
    let tokens_out = math::mul_div(side_reserve, amount_in, denom).ok()?;
    if tokens_out == 0 || tokens_out > side_reserve {
        return None;
    }

    let effective_price = Decimal::from(amount_in) / Decimal::from(tokens_out);
    let spot = spot_price(reserves, side)?;
    let price_impact = if spot.is_zero() {
        Decimal::ZERO
    } else {
        (effective_price - spot) / spot
    };

    Some(SwapQuote {
        side,
        amount_in,
        tokens_out,
        effective_price,
        price_impact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seeded(yes_reserve: u64, no_reserve: u64) -> ReserveLedger {
        ReserveLedger {
            yes_reserve,
            no_reserve,
            ..ReserveLedger::new()
        }
    }

    #[test]
    fn odds_at_parity_are_even() {
        let odds = implied_odds(&seeded(500_000, 500_000)).unwrap();
        assert_eq!(odds.yes, dec!(0.5));
        assert_eq!(odds.no, dec!(0.5));
    }

    #[test]
    fn odds_follow_the_skew() {
        // yes reserve drained by yes buying: yes now more expensive / more likely
        let odds = implied_odds(&seeded(250_000, 500_000)).unwrap();
        assert!(odds.yes > dec!(0.5));
        assert!(odds.no < dec!(0.5));
        assert_eq!(odds.yes + odds.no, Decimal::ONE);
    }

    #[test]
    fn odds_need_reserves() {
        assert!(implied_odds(&ReserveLedger::new()).is_none());
    }

    #[test]
    fn spot_price_at_parity_is_one() {
        assert_eq!(spot_price(&seeded(500_000, 500_000), Side::Yes), Some(Decimal::ONE));
        assert_eq!(spot_price(&seeded(0, 500_000), Side::Yes), None);
    }

    #[test]
    fn preview_matches_engine_arithmetic() {
        let quote = swap_preview(&seeded(500_000, 500_000), Side::Yes, 100_000).unwrap();
        // 500,000 * 100,000 / 600,000 floors to 83,333
        assert_eq!(quote.tokens_out, 83_333);
        assert!(quote.effective_price > Decimal::ONE);
        assert!(quote.price_impact > Decimal::ZERO);
    }

    #[test]
    fn preview_rejects_empty_pool() {
        assert!(swap_preview(&ReserveLedger::new(), Side::Yes, 100_000).is_none());
        assert!(swap_preview(&seeded(500_000, 500_000), Side::No, 0).is_none());
    }

    #[test]
    fn bigger_trades_pay_more_impact() {
        let reserves = seeded(500_000, 500_000);
        let small = swap_preview(&reserves, Side::Yes, 10_000).unwrap();
        let large = swap_preview(&reserves, Side::Yes, 400_000).unwrap();
        assert!(large.price_impact > small.price_impact);
    }
}
