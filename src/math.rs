// 2.0: checked u64 arithmetic for the reserve engine. the host ledger's unit
// type is u64 and its VM rejects a transaction on overflow or division by
// zero, so every multiply and divide here is checked and fails closed.
// no u128 widening: a product that would not fit u64 is a failure, not a
// value to carry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum MathError {
    #[error("u64 overflow")]
    Overflow,
    #[error("u64 underflow")]
    Underflow,
    #[error("division by zero")]
    DivideByZero,
}

pub fn add(a: u64, b: u64) -> Result<u64, MathError> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

pub fn sub(a: u64, b: u64) -> Result<u64, MathError> {
    a.checked_sub(b).ok_or(MathError::Underflow)
}

pub fn mul(a: u64, b: u64) -> Result<u64, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

pub fn div(a: u64, b: u64) -> Result<u64, MathError> {
    a.checked_div(b).ok_or(MathError::DivideByZero)
}

/// `a * b / d`, multiplication first. Evaluation order matters: flooring the
/// product before the division is what the pricing formulas specify.
pub fn mul_div(a: u64, b: u64, d: u64) -> Result<u64, MathError> {
    div(mul(a, b)?, d)
}

// 2.1: the no/yes skew ratio used to seed pricing reserves.
// the +1 on both sides avoids dividing by zero on an empty pool.
// truncates to 0 when the no reserve sits far below the yes reserve;
// callers treat a later division by that 0 as a failed operation.
pub fn seed_ratio(no_reserve: u64, yes_reserve: u64) -> Result<u64, MathError> {
    div(add(1, no_reserve)?, add(1, yes_reserve)?)
}
