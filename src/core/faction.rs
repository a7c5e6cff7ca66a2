//! Faction identification.
//!
//! A faction (the game's "chain") is an opaque ownership identity for
//! outposts. Only equality matters to the planner; the `Ord` derive exists so
//! factions can key ordered collections deterministically.

use serde::{Deserialize, Serialize};

/// Competing ownership identity for outposts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Faction(pub u8);

impl Faction {
    /// Create a new faction ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw faction index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chain {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_basics() {
        let a = Faction::new(0);
        let b = Faction::new(3);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 3);
        assert_ne!(a, b);
        assert_eq!(format!("{}", b), "Chain 3");
    }

    #[test]
    fn test_faction_serde() {
        let faction = Faction::new(7);
        let json = serde_json::to_string(&faction).unwrap();
        let deserialized: Faction = serde_json::from_str(&json).unwrap();
        assert_eq!(faction, deserialized);
    }
}
