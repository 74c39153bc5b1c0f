//! Level table - how much XP each level requires.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// XP thresholds for the first levels.
pub const DEFAULT_XP_TABLE: [u64; 10] = [100, 180, 260, 350, 450, 560, 680, 820, 970, 1130];

/// Base value of the derived formula used past the end of the table.
pub const DEFAULT_OVERFLOW_BASE: u64 = 1200;

/// Per-level increment of the derived formula.
pub const DEFAULT_OVERFLOW_INCREMENT: u64 = 180;

/// Highest reachable level. XP carried past it is discarded.
pub const MAX_LEVEL: u32 = 999;

/// Ordered XP thresholds for levels `1..=K`, with a linear formula beyond `K`.
///
/// Levels past the table use `overflow_base + (level - K) * overflow_increment`.
/// Construction rejects tables that are empty, contain a zero threshold, or
/// are not monotonically non-decreasing (including the first derived level),
/// so `xp_required_for` is total and a level-up loop always terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelTable")]
pub struct LevelTable {
    #[serde(rename = "xp_table")]
    thresholds: Vec<u64>,
    overflow_base: u64,
    overflow_increment: u64,
}

impl LevelTable {
    /// Build a validated level table.
    pub fn new(
        thresholds: Vec<u64>,
        overflow_base: u64,
        overflow_increment: u64,
    ) -> Result<Self, RulesError> {
        if thresholds.is_empty() {
            return Err(RulesError::EmptyLevelTable);
        }

        let mut previous = 0;
        for (idx, value) in thresholds.iter().copied().enumerate() {
            let level = idx as u32 + 1;
            if value == 0 {
                return Err(RulesError::ZeroThreshold { level });
            }
            if value < previous {
                return Err(RulesError::NonMonotonicThreshold {
                    level,
                    value,
                    previous,
                });
            }
            previous = value;
        }

        let first_derived = overflow_base.saturating_add(overflow_increment);
        if first_derived < previous {
            return Err(RulesError::NonMonotonicThreshold {
                level: thresholds.len() as u32 + 1,
                value: first_derived,
                previous,
            });
        }

        Ok(Self {
            thresholds,
            overflow_base,
            overflow_increment,
        })
    }

    /// Number of explicitly tabulated levels.
    pub fn tabulated_levels(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// XP needed to advance from `level` to `level + 1`.
    ///
    /// Levels below 1 are treated as level 1.
    pub fn xp_required_for(&self, level: u32) -> u64 {
        let level = level.max(1);
        let idx = (level - 1) as usize;
        match self.thresholds.get(idx) {
            Some(threshold) => *threshold,
            None => {
                let beyond = u64::from(level - self.tabulated_levels());
                self.overflow_base
                    .saturating_add(beyond.saturating_mul(self.overflow_increment))
            }
        }
    }
}

/// Unvalidated form read from configuration files.
#[derive(Deserialize)]
#[serde(default)]
struct RawLevelTable {
    xp_table: Vec<u64>,
    overflow_base: u64,
    overflow_increment: u64,
}

impl Default for RawLevelTable {
    fn default() -> Self {
        Self {
            xp_table: DEFAULT_XP_TABLE.to_vec(),
            overflow_base: DEFAULT_OVERFLOW_BASE,
            overflow_increment: DEFAULT_OVERFLOW_INCREMENT,
        }
    }
}

impl TryFrom<RawLevelTable> for LevelTable {
    type Error = RulesError;

    fn try_from(raw: RawLevelTable) -> Result<Self, Self::Error> {
        LevelTable::new(raw.xp_table, raw.overflow_base, raw.overflow_increment)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_XP_TABLE.to_vec(),
            overflow_base: DEFAULT_OVERFLOW_BASE,
            overflow_increment: DEFAULT_OVERFLOW_INCREMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabulated_levels() {
        let table = LevelTable::default();
        assert_eq!(table.xp_required_for(1), 100);
        assert_eq!(table.xp_required_for(2), 180);
        assert_eq!(table.xp_required_for(10), 1130);
    }

    #[test]
    fn test_derived_levels() {
        let table = LevelTable::default();
        assert_eq!(table.xp_required_for(11), 1380);
        assert_eq!(table.xp_required_for(12), 1560);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        let table = LevelTable::default();
        assert_eq!(table.xp_required_for(0), table.xp_required_for(1));
    }

    #[test]
    fn test_thresholds_never_decrease() {
        let table = LevelTable::default();
        for level in 1..200 {
            assert!(table.xp_required_for(level + 1) >= table.xp_required_for(level));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let table: LevelTable =
            serde_json::from_str(r#"{"xp_table": [10, 20], "overflow_base": 20, "overflow_increment": 5}"#)
                .unwrap();
        assert_eq!(table.xp_required_for(3), 25);

        let partial: LevelTable = serde_json::from_str(r#"{"overflow_increment": 200}"#).unwrap();
        assert_eq!(partial.xp_required_for(11), 1400);

        assert!(serde_json::from_str::<LevelTable>(r#"{"xp_table": [30, 10]}"#).is_err());
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(matches!(
            LevelTable::new(vec![], 10, 10),
            Err(RulesError::EmptyLevelTable)
        ));
        assert!(matches!(
            LevelTable::new(vec![0, 10], 10, 10),
            Err(RulesError::ZeroThreshold { level: 1 })
        ));
        assert!(matches!(
            LevelTable::new(vec![50, 40], 100, 10),
            Err(RulesError::NonMonotonicThreshold { level: 2, .. })
        ));
        assert!(matches!(
            LevelTable::new(vec![50, 500], 100, 10),
            Err(RulesError::NonMonotonicThreshold { level: 3, .. })
        ));
    }
}
