// 1.0: all the primitives live here. nothing in the engine works without these types.
// addresses, asset ids, the yes/no side, resolution state, timestamps. each is a
// newtype so the compiler catches type mixups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque account identity, verified by the host ledger. The engine never
/// inspects it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-ledger asset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

// Yes = event occurs. No = event does not occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "yes"),
            Side::No => write!(f, "no"),
        }
    }
}

// 1.1: tri-state market resolution. starts Unresolved, set at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Unresolved,
    Yes,
    No,
}

impl Resolution {
    pub fn from_winner(side: Side) -> Self {
        match side {
            Side::Yes => Resolution::Yes,
            Side::No => Resolution::No,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Resolution::Unresolved => None,
            Resolution::Yes => Some(Side::Yes),
            Resolution::No => Some(Side::No),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Unresolved
    }
}

// 1.2: millisecond timestamp. the host ledger drives the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Yes.opposite(), Side::No);
        assert_eq!(Side::No.opposite(), Side::Yes);
        assert_eq!(Side::Yes.opposite().opposite(), Side::Yes);
    }

    #[test]
    fn resolution_winner() {
        assert_eq!(Resolution::Unresolved.winner(), None);
        assert_eq!(Resolution::Yes.winner(), Some(Side::Yes));
        assert_eq!(Resolution::No.winner(), Some(Side::No));
        assert!(!Resolution::Unresolved.is_resolved());
        assert!(Resolution::from_winner(Side::No).is_resolved());
    }

    #[test]
    fn address_roundtrip() {
        let addr = Address::new("CREATORXYZ");
        assert_eq!(addr.as_str(), "CREATORXYZ");
        assert_eq!(addr.to_string(), "CREATORXYZ");
        assert_eq!(addr, Address::new(String::from("CREATORXYZ")));
    }
}
