//! Per-zone crossing counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic count of objects that crossed one zone's line.
///
/// Only the owning track manager can increment it; there is no decrement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter(u64);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn increment(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Which counting zone a pipeline serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Boxes on the conveyor belt
    Conveyor,
    /// Pallets
    Pallet,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conveyor => "conveyor",
            Self::Pallet => "pallet",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of both zone counters, as exposed to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub boxes: u64,
    pub pallets: u64,
}

impl Counts {
    pub fn get(&self, zone: ZoneKind) -> u64 {
        match zone {
            ZoneKind::Conveyor => self.boxes,
            ZoneKind::Pallet => self.pallets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_increments() {
        let mut counter = Counter::new();
        assert_eq!(counter.get(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_counts_by_zone() {
        let counts = Counts {
            boxes: 3,
            pallets: 1,
        };
        assert_eq!(counts.get(ZoneKind::Conveyor), 3);
        assert_eq!(counts.get(ZoneKind::Pallet), 1);
        assert_eq!(ZoneKind::Pallet.to_string(), "pallet");
    }
}
