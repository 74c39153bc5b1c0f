//! The persisted progression record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::{LevelTable, MAX_LEVEL};
use crate::zones::Zone;

/// The single persisted progression record.
///
/// Serialized with the camelCase field names of the stored JSON object.
/// Achievements are stored as an object mapping each unlocked id to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionState {
    pub level: u32,
    pub xp: u64,
    #[serde(with = "achievement_map")]
    pub achievements: BTreeSet<String>,
    pub visited_zones: BTreeSet<Zone>,
    pub projects_inspected: u32,
    pub sound_on: bool,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            achievements: BTreeSet::new(),
            visited_zones: BTreeSet::new(),
            projects_inspected: 0,
            sound_on: false,
        }
    }
}

impl ProgressionState {
    /// Create a fresh record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored record, recovering field by field.
    ///
    /// Anything that is not a JSON object yields the defaults. Inside an object,
    /// each missing, `null` or ill-typed field falls back to its own default
    /// while the well-formed fields are kept.
    pub fn from_json(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored progression is not valid JSON, using defaults: {}", e);
                return Self::default();
            }
        };

        let Some(fields) = value.as_object() else {
            tracing::warn!("Stored progression is not an object, using defaults");
            return Self::default();
        };

        let defaults = Self::default();
        Self {
            level: field(fields, "level").unwrap_or(defaults.level).max(1),
            xp: field(fields, "xp").unwrap_or(defaults.xp),
            achievements: fields
                .get("achievements")
                .map(achievement_map::from_value)
                .unwrap_or(defaults.achievements),
            visited_zones: fields
                .get("visitedZones")
                .map(zones_from_value)
                .unwrap_or(defaults.visited_zones),
            projects_inspected: field(fields, "projectsInspected")
                .unwrap_or(defaults.projects_inspected),
            sound_on: field(fields, "soundOn").unwrap_or(defaults.sound_on),
        }
    }

    /// Encode the whole record.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore the `xp < xp_required_for(level)` invariant by carrying any
    /// overflow into levels. Returns the number of levels gained.
    ///
    /// Stored levels outside `1..=MAX_LEVEL` are clamped first, so the carry
    /// runs at most `MAX_LEVEL` times.
    pub fn normalize(&mut self, table: &LevelTable) -> u32 {
        if self.level > MAX_LEVEL {
            tracing::warn!("Stored level {} is above the cap, clamping to {}", self.level, MAX_LEVEL);
        }
        self.level = self.level.clamp(1, MAX_LEVEL);
        let mut gained = 0;
        while self.carry_level(table) {
            gained += 1;
        }
        gained
    }

    /// Convert one level's worth of XP into a level.
    ///
    /// Returns `false` when the XP does not fill the current level. At
    /// `MAX_LEVEL` nothing is carried and XP is capped just below the
    /// current threshold.
    pub fn carry_level(&mut self, table: &LevelTable) -> bool {
        let required = table.xp_required_for(self.level);
        if self.xp < required {
            return false;
        }
        match self.level.checked_add(1).filter(|next| *next <= MAX_LEVEL) {
            Some(next) => {
                self.xp -= required;
                self.level = next;
                true
            }
            None => {
                self.xp = required - 1;
                false
            }
        }
    }

    /// Whether an achievement id is unlocked.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    /// Mark an achievement unlocked. Returns `false` if it already was.
    pub fn mark_unlocked(&mut self, id: &str) -> bool {
        self.achievements.insert(id.to_string())
    }

    /// Record a zone visit. Returns `false` if it was already visited.
    pub fn visit(&mut self, zone: Zone) -> bool {
        self.visited_zones.insert(zone)
    }

    /// Whether every canonical zone has been visited.
    pub fn has_visited_all_zones(&self) -> bool {
        Zone::ALL.iter().all(|zone| self.visited_zones.contains(zone))
    }
}

fn field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Stored progression field '{}' is malformed, using default: {}", key, e);
            None
        }
    }
}

/// Keeps every known zone id in the stored list; unknown entries are dropped.
fn zones_from_value(value: &Value) -> BTreeSet<Zone> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(Zone::from_id)
            .collect(),
        None => {
            if !value.is_null() {
                tracing::warn!("Stored progression field 'visitedZones' is malformed, using default");
            }
            BTreeSet::new()
        }
    }
}

mod achievement_map {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::collections::BTreeSet;

    pub fn serialize<S: Serializer>(ids: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ids.len()))?;
        for id in ids {
            map.serialize_entry(id, &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(from_value(&value))
    }

    /// Only entries explicitly set to `true` count as unlocked.
    pub fn from_value(value: &Value) -> BTreeSet<String> {
        match value.as_object() {
            Some(entries) => entries
                .iter()
                .filter(|(_, unlocked)| unlocked.as_bool() == Some(true))
                .map(|(id, _)| id.clone())
                .collect(),
            None => {
                if !value.is_null() {
                    tracing::warn!("Stored progression field 'achievements' is malformed, using default");
                }
                BTreeSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ProgressionState::new();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert!(state.achievements.is_empty());
        assert!(!state.sound_on);
    }

    #[test]
    fn test_garbage_decodes_to_defaults() {
        assert_eq!(ProgressionState::from_json("not json"), ProgressionState::default());
        assert_eq!(ProgressionState::from_json("[1, 2]"), ProgressionState::default());
        assert_eq!(ProgressionState::from_json(""), ProgressionState::default());
    }

    #[test]
    fn test_field_by_field_recovery() {
        let raw = r#"{
            "level": "three",
            "xp": 42,
            "achievements": {"enter_night": true, "copy_channel": false},
            "visitedZones": ["about", "blog", 7, "skills"],
            "projectsInspected": null,
            "soundOn": true
        }"#;

        let state = ProgressionState::from_json(raw);

        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 42);
        assert!(state.is_unlocked("enter_night"));
        assert!(!state.is_unlocked("copy_channel"));
        assert_eq!(
            state.visited_zones.iter().copied().collect::<Vec<_>>(),
            vec![Zone::About, Zone::Skills]
        );
        assert_eq!(state.projects_inspected, 0);
        assert!(state.sound_on);
    }

    #[test]
    fn test_level_zero_is_clamped() {
        let state = ProgressionState::from_json(r#"{"level": 0}"#);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_stored_shape() {
        let mut state = ProgressionState::new();
        state.mark_unlocked("enter_night");
        state.visit(Zone::Projects);

        let value: Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

        assert_eq!(value["achievements"]["enter_night"], Value::Bool(true));
        assert_eq!(value["visitedZones"][0], Value::String("projects".into()));
        assert_eq!(value["projectsInspected"], Value::from(0));
        assert_eq!(value["soundOn"], Value::Bool(false));
    }

    #[test]
    fn test_encoded_record_decodes_identically() {
        let mut state = ProgressionState::new();
        state.level = 4;
        state.xp = 12;
        state.mark_unlocked("toggle_sound");
        state.visit(Zone::Contact);
        state.projects_inspected = 2;
        state.sound_on = true;

        let decoded = ProgressionState::from_json(&state.to_json().unwrap());
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_normalize_carries_overflow() {
        let table = LevelTable::default();
        let mut state = ProgressionState::new();
        state.xp = 100 + 180 + 5;

        let gained = state.normalize(&table);

        assert_eq!(gained, 2);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 5);
    }

    #[test]
    fn test_huge_stored_level_is_clamped() {
        let table = LevelTable::default();
        let mut state = ProgressionState::from_json(r#"{"level": 4294967295, "xp": 1000000000000}"#);

        state.normalize(&table);

        assert_eq!(state.level, MAX_LEVEL);
        assert!(state.xp < table.xp_required_for(state.level));
    }

    #[test]
    fn test_carry_stops_at_max_level() {
        let table = LevelTable::default();
        let mut state = ProgressionState::new();
        state.level = MAX_LEVEL - 1;
        state.xp = u64::MAX;

        let gained = state.normalize(&table);

        assert_eq!(gained, 1);
        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.xp, table.xp_required_for(MAX_LEVEL) - 1);
        assert!(!state.carry_level(&table));
    }

    #[test]
    fn test_mark_unlocked_is_idempotent() {
        let mut state = ProgressionState::new();
        assert!(state.mark_unlocked("copy_channel"));
        assert!(!state.mark_unlocked("copy_channel"));
    }

    #[test]
    fn test_visited_all_zones() {
        let mut state = ProgressionState::new();
        for zone in [Zone::Contact, Zone::About, Zone::Skills] {
            state.visit(zone);
        }
        assert!(!state.has_visited_all_zones());
        state.visit(Zone::Projects);
        assert!(state.has_visited_all_zones());
    }
}
