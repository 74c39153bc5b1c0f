//! Progression Engine - XP, levels, achievements and the triggers that drive them.
//!
//! The engine is the sole owner and writer of the [`ProgressionState`]. Every
//! mutation is written through to the [`ProgressStore`] before the HUD refresh
//! that reports it. A store that fails is logged and otherwise ignored: the
//! engine keeps working in memory for the rest of the session.

mod interaction;

pub use interaction::*;

use serde::{Deserialize, Serialize};

use portfolio_rules::{
    find_achievement, Achievement, LevelTable, ProgressionState, Zone, ACHIEVEMENTS,
    INSPECT_3_PROJECTS, TOGGLE_SOUND, VISIT_ALL_ZONES,
};

use crate::effects::{Cue, Effect, HudSnapshot, ProgressRequest};
use crate::store::ProgressStore;

/// Tunables of the progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    #[serde(flatten)]
    pub levels: LevelTable,

    /// Largest single award. Bigger amounts are ignored.
    pub max_award: i64,
    /// Awards of at least this much XP get a "+XP" toast.
    pub toast_threshold: i64,
    /// Silent bonus granted with every newly unlocked achievement.
    pub unlock_bonus_xp: i64,
    pub inspection_xp: i64,
    /// Number of project inspections that unlocks "Investigator".
    pub investigator_threshold: u32,

    pub entry_xp: i64,
    pub copy_channel_xp: i64,
    pub random_mission_xp: i64,
    pub project_view_xp: i64,
    pub resume_xp: i64,
    pub trophies_xp: i64,

    pub level_up_toast_ms: u64,
    pub trophy_toast_ms: u64,
    pub xp_toast_ms: u64,
    pub audio_toast_ms: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            max_award: 10_000,
            toast_threshold: 10,
            unlock_bonus_xp: 20,
            inspection_xp: 15,
            investigator_threshold: 3,
            entry_xp: 25,
            copy_channel_xp: 10,
            random_mission_xp: 5,
            project_view_xp: 2,
            resume_xp: 5,
            trophies_xp: 3,
            level_up_toast_ms: 6000,
            trophy_toast_ms: 6000,
            xp_toast_ms: 6000,
            audio_toast_ms: 1300,
        }
    }
}

/// A catalog entry paired with its unlocked flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trophy {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

/// Owns the progression record and applies its mutation rules.
pub struct ProgressionEngine<S: ProgressStore> {
    state: ProgressionState,
    config: ProgressionConfig,
    store: S,
}

impl<S: ProgressStore> ProgressionEngine<S> {
    /// Build the engine from whatever the store holds.
    ///
    /// Absent, malformed or unreadable records fall back to defaults; an
    /// over-full XP counter is carried into levels without notifications.
    pub fn load(store: S, config: ProgressionConfig) -> Self {
        let mut state = match store.load() {
            Ok(Some(raw)) => ProgressionState::from_json(&raw),
            Ok(None) => ProgressionState::default(),
            Err(e) => {
                tracing::warn!("Progress store unavailable, starting fresh in memory: {}", e);
                ProgressionState::default()
            }
        };

        let gained = state.normalize(&config.levels);
        if gained > 0 {
            tracing::debug!("Normalized stored progression by {} level(s)", gained);
        }

        Self {
            state,
            config,
            store,
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sound_on(&self) -> bool {
        self.state.sound_on
    }

    /// XP required to finish the current level.
    pub fn xp_required(&self) -> u64 {
        self.config.levels.xp_required_for(self.state.level)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            level: self.state.level,
            xp: self.state.xp,
            next: self.xp_required(),
        }
    }

    /// Every achievement in display order with its unlocked flag.
    pub fn trophies(&self) -> Vec<Trophy> {
        ACHIEVEMENTS
            .iter()
            .map(|achievement| Trophy {
                achievement,
                unlocked: self.state.is_unlocked(achievement.id),
            })
            .collect()
    }

    /// Add XP and carry any overflow into levels.
    ///
    /// Non-positive amounts and amounts above `max_award` are ignored. Each
    /// level gained is persisted and reported (HUD refresh plus a "Level Up"
    /// toast, and a cue unless `silent`) before the next one is checked,
    /// lowest level first. Levels stop at `MAX_LEVEL`. The final
    /// state is persisted and reported unconditionally. Non-silent awards of
    /// at least `toast_threshold` also get a "+XP" toast naming `reason`.
    pub fn award_xp(&mut self, amount: i64, reason: &str, silent: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if amount <= 0 {
            tracing::debug!("Ignoring non-positive XP award {} ({})", amount, reason);
            return effects;
        }
        if amount > self.config.max_award {
            tracing::debug!(
                "Ignoring XP award {} above the {} cap ({})",
                amount,
                self.config.max_award,
                reason
            );
            return effects;
        }

        self.state.xp = self.state.xp.saturating_add(amount as u64);
        tracing::debug!("Awarded {} XP: {}", amount, reason);

        while self.state.carry_level(&self.config.levels) {
            self.persist();
            effects.push(Effect::RefreshHud(self.hud()));

            tracing::info!("Reached level {}", self.state.level);
            effects.push(Effect::notify(
                "Level Up",
                format!("Reached level {}", self.state.level),
                self.config.level_up_toast_ms,
            ));
            if !silent {
                self.push_cue(&mut effects);
            }
        }

        self.persist();
        effects.push(Effect::RefreshHud(self.hud()));

        if !silent && !reason.is_empty() && amount >= self.config.toast_threshold {
            effects.push(Effect::notify(
                "+XP",
                format!("{} XP · {}", amount, reason),
                self.config.xp_toast_ms,
            ));
        }

        effects
    }

    /// Unlock an achievement.
    ///
    /// Unknown ids and already unlocked achievements are no-ops. A first
    /// unlock is persisted, announced with a "Trophy Unlocked" toast and a cue,
    /// and grants a silent XP bonus.
    pub fn unlock(&mut self, id: &str) -> Vec<Effect> {
        let Some(achievement) = find_achievement(id) else {
            tracing::debug!("Ignoring unlock of unknown achievement '{}'", id);
            return Vec::new();
        };
        if !self.state.mark_unlocked(achievement.id) {
            return Vec::new();
        }

        self.persist();
        tracing::info!("Unlocked achievement '{}'", achievement.id);

        let mut effects = vec![Effect::notify(
            "Trophy Unlocked",
            achievement.name,
            self.config.trophy_toast_ms,
        )];
        self.push_cue(&mut effects);
        effects.extend(self.award_xp(
            self.config.unlock_bonus_xp,
            &format!("Trophy: {}", achievement.name),
            true,
        ));
        effects
    }

    /// Record a zone visit; visiting every zone unlocks "World Explorer".
    pub fn track_visit(&mut self, zone: Zone) -> Vec<Effect> {
        if self.state.visit(zone) {
            tracing::debug!("First visit to zone '{}'", zone);
        }
        self.persist();

        if self.state.has_visited_all_zones() {
            self.unlock(VISIT_ALL_ZONES)
        } else {
            Vec::new()
        }
    }

    /// Count a project inspection and award XP for it.
    pub fn record_project_inspection(&mut self) -> Vec<Effect> {
        self.count_project_inspection();
        let mut effects = self.award_xp(self.config.inspection_xp, "Inspected project", false);
        effects.extend(self.unlock_investigator_if_earned());
        effects
    }

    pub(crate) fn count_project_inspection(&mut self) {
        self.state.projects_inspected = self.state.projects_inspected.saturating_add(1);
        self.persist();
    }

    pub(crate) fn unlock_investigator_if_earned(&mut self) -> Vec<Effect> {
        if self.state.projects_inspected >= self.config.investigator_threshold {
            self.unlock(INSPECT_3_PROJECTS)
        } else {
            Vec::new()
        }
    }

    /// Flip the sound preference.
    pub fn toggle_sound(&mut self) -> Vec<Effect> {
        self.state.sound_on = !self.state.sound_on;
        self.persist();

        let mut effects = Vec::new();
        if self.state.sound_on {
            self.push_cue(&mut effects);
            effects.extend(self.unlock(TOGGLE_SOUND));
            effects.push(Effect::notify(
                "Audio Online",
                "Sound effects enabled.",
                self.config.audio_toast_ms,
            ));
        } else {
            effects.push(Effect::notify(
                "Audio Offline",
                "Sound effects disabled.",
                self.config.audio_toast_ms,
            ));
        }
        effects
    }

    /// Apply a request raised by another engine.
    pub fn apply(&mut self, request: ProgressRequest) -> Vec<Effect> {
        match request {
            ProgressRequest::AwardXp { amount, reason } => self.award_xp(amount, &reason, false),
            ProgressRequest::Unlock(id) => self.unlock(&id),
            ProgressRequest::TrackVisit(zone) => self.track_visit(zone),
        }
    }

    /// Delete the stored record and start over in memory.
    ///
    /// The host is expected to restart once it sees
    /// [`Effect::RestartRequested`].
    pub fn reset_all(&mut self) -> Vec<Effect> {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored progression: {}", e);
        }
        self.state = ProgressionState::default();
        tracing::info!("Progression reset");
        vec![Effect::RestartRequested]
    }

    /// Queue the confirm cue if the player has sound enabled.
    pub(crate) fn push_cue(&self, effects: &mut Vec<Effect>) {
        if self.state.sound_on {
            effects.push(Effect::PlayCue(Cue::Confirm));
        }
    }

    fn persist(&mut self) {
        let record = match self.state.to_json() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to encode progression: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&record) {
            tracing::warn!("Failed to persist progression: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::notification_titles;
    use crate::store::MemoryStore;
    use portfolio_rules::{COPY_CHANNEL, ENTER_NIGHT, MAX_LEVEL};

    fn engine() -> ProgressionEngine<MemoryStore> {
        ProgressionEngine::load(MemoryStore::new(), ProgressionConfig::default())
    }

    fn stored(engine: &ProgressionEngine<MemoryStore>) -> ProgressionState {
        ProgressionState::from_json(engine.store().record().unwrap())
    }

    #[test]
    fn test_award_scenario_reaches_level_two() {
        let mut engine = engine();

        engine.award_xp(25, "a", false);
        assert_eq!((engine.state().level, engine.state().xp), (1, 25));

        engine.award_xp(25, "b", false);
        engine.award_xp(25, "c", false);
        assert_eq!((engine.state().level, engine.state().xp), (1, 75));

        let effects = engine.award_xp(25, "d", false);
        assert_eq!((engine.state().level, engine.state().xp), (2, 0));
        assert!(notification_titles(&effects).contains(&"Level Up"));
    }

    fn level_and_xp(amounts: &[i64]) -> (u32, u64) {
        let mut engine = engine();
        for amount in amounts {
            engine.award_xp(*amount, "step", false);
        }
        (engine.state().level, engine.state().xp)
    }

    #[test]
    fn test_award_is_associative() {
        let sequences: [&[i64]; 5] = [
            &[7, 250, 13, 999, 1, 440, 3000, 56],
            &[100, 180, 260, 340],
            &[1; 12],
            &[99, 1, 179, 1, 259, 1],
            &[5000, 4999, 1],
        ];

        for amounts in sequences {
            let total: i64 = amounts.iter().sum();
            let expected = level_and_xp(amounts);
            assert_eq!(level_and_xp(&[total]), expected, "{:?} summed", amounts);

            let mut reversed = amounts.to_vec();
            reversed.reverse();
            assert_eq!(level_and_xp(&reversed), expected, "{:?} reversed", amounts);

            for split in 1..amounts.len() {
                let (head, tail) = amounts.split_at(split);
                let mut regrouped = vec![head.iter().sum::<i64>()];
                regrouped.extend_from_slice(tail);
                assert_eq!(level_and_xp(&regrouped), expected, "{:?} split at {}", amounts, split);
            }
        }
    }

    #[test]
    fn test_award_above_cap_is_ignored() {
        let mut engine = engine();
        let cap = engine.config().max_award;

        assert!(engine.award_xp(cap + 1, "too much", false).is_empty());
        assert!(engine.award_xp(i64::MAX, "way too much", false).is_empty());
        assert_eq!(engine.state(), &ProgressionState::default());
        assert!(engine.store().record().is_none());

        let effects = engine.award_xp(cap, "exactly the cap", false);
        assert!(notification_titles(&effects).contains(&"Level Up"));
        assert!(engine.state().level > 1);
        assert!(engine.state().xp < engine.xp_required());
    }

    #[test]
    fn test_award_keeps_xp_below_threshold() {
        let mut engine = engine();
        for amount in [1, 99, 100, 181, 5000, 9999, 3] {
            engine.award_xp(amount, "grind", true);
            assert!(engine.state().xp < engine.xp_required());
        }
    }

    #[test]
    fn test_multiple_level_ups_in_one_award() {
        let mut engine = engine();
        let effects = engine.award_xp(100 + 180 + 260, "jackpot", false);

        assert_eq!(engine.state().level, 4);
        assert_eq!(engine.state().xp, 0);

        let titles = notification_titles(&effects);
        assert_eq!(titles.iter().filter(|t| **t == "Level Up").count(), 3);
        assert_eq!(titles.last(), Some(&"+XP"));

        let levels: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::RefreshHud(hud) => Some(hud.level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3, 4, 4]);
    }

    #[test]
    fn test_invalid_award_is_noop() {
        let mut engine = engine();
        assert!(engine.award_xp(0, "nothing", false).is_empty());
        assert!(engine.award_xp(-5, "negative", false).is_empty());
        assert_eq!(engine.state(), &ProgressionState::default());
        assert!(engine.store().record().is_none());
    }

    #[test]
    fn test_small_or_silent_awards_have_no_xp_toast() {
        let mut engine = engine();
        assert!(notification_titles(&engine.award_xp(9, "small", false)).is_empty());
        assert!(notification_titles(&engine.award_xp(50, "quiet", true)).is_empty());
        assert_eq!(notification_titles(&engine.award_xp(10, "enough", false)), vec!["+XP"]);
    }

    #[test]
    fn test_award_writes_through() {
        let mut engine = engine();
        engine.award_xp(42, "persist", false);
        assert_eq!(stored(&engine).xp, 42);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut engine = engine();

        let first = engine.unlock(COPY_CHANNEL);
        assert_eq!(notification_titles(&first), vec!["Trophy Unlocked"]);
        assert_eq!(engine.state().xp, 20);
        assert!(stored(&engine).is_unlocked(COPY_CHANNEL));

        let before = engine.state().clone();
        let second = engine.unlock(COPY_CHANNEL);
        assert!(second.is_empty());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_unlock_unknown_is_noop() {
        let mut engine = engine();
        assert!(engine.unlock("no_such_trophy").is_empty());
        assert!(engine.state().achievements.is_empty());
    }

    #[test]
    fn test_unlock_bonus_can_level_up_without_xp_toast() {
        let mut engine = engine();
        engine.award_xp(90, "setup", true);

        let effects = engine.unlock(ENTER_NIGHT);

        assert_eq!(engine.state().level, 2);
        assert_eq!(engine.state().xp, 10);
        assert_eq!(notification_titles(&effects), vec!["Trophy Unlocked", "Level Up"]);
    }

    #[test]
    fn test_visiting_all_zones_unlocks_once() {
        use portfolio_rules::Zone::*;
        let orders: [&[Zone]; 5] = [
            &[Skills, Skills, Contact, About, Projects, About, Projects],
            &[About, Projects, Skills, Contact],
            &[Contact, Skills, Projects, About, Contact, Skills, Projects, About],
            &[Projects, Projects, Projects, About, Skills, Skills, Contact, Contact],
            &[Contact, Contact, Contact, Skills, About, About, Projects],
        ];

        for order in orders {
            let mut engine = engine();
            let mut unlocks = 0;
            for zone in order.iter().chain(order.iter().rev()) {
                let effects = engine.track_visit(*zone);
                unlocks += notification_titles(&effects)
                    .iter()
                    .filter(|t| **t == "Trophy Unlocked")
                    .count();
            }

            assert_eq!(unlocks, 1, "{:?}", order);
            assert!(engine.state().is_unlocked(VISIT_ALL_ZONES));
            assert_eq!(stored(&engine).visited_zones.len(), 4);
        }
    }

    #[test]
    fn test_investigator_needs_three_inspections() {
        let mut engine = engine();

        engine.record_project_inspection();
        engine.record_project_inspection();
        assert!(!engine.state().is_unlocked(INSPECT_3_PROJECTS));

        let third = engine.record_project_inspection();
        assert!(engine.state().is_unlocked(INSPECT_3_PROJECTS));
        assert!(notification_titles(&third).contains(&"Trophy Unlocked"));

        let fourth = engine.record_project_inspection();
        assert!(!notification_titles(&fourth).contains(&"Trophy Unlocked"));
        assert_eq!(engine.state().projects_inspected, 4);
    }

    #[test]
    fn test_cues_follow_sound_preference() {
        let mut engine = engine();
        let quiet = engine.award_xp(100, "muted", false);
        assert!(!quiet.contains(&Effect::PlayCue(Cue::Confirm)));

        let toggled = engine.toggle_sound();
        assert!(engine.sound_on());
        assert_eq!(toggled.first(), Some(&Effect::PlayCue(Cue::Confirm)));
        assert!(engine.state().is_unlocked(TOGGLE_SOUND));
        assert_eq!(notification_titles(&toggled).last(), Some(&"Audio Online"));

        let loud = engine.award_xp(180, "audible", false);
        assert!(loud.contains(&Effect::PlayCue(Cue::Confirm)));

        let off = engine.toggle_sound();
        assert_eq!(notification_titles(&off), vec!["Audio Offline"]);
    }

    #[test]
    fn test_load_recovers_and_normalizes() {
        let store = MemoryStore::with_record(r#"{"level": 2, "xp": 200, "soundOn": "yes"}"#);
        let engine = ProgressionEngine::load(store, ProgressionConfig::default());

        assert_eq!(engine.state().level, 3);
        assert_eq!(engine.state().xp, 20);
        assert!(!engine.sound_on());
    }

    #[test]
    fn test_load_clamps_runaway_level() {
        let store = MemoryStore::with_record(r#"{"level": 4294967295, "xp": 1000000000000}"#);
        let mut engine = ProgressionEngine::load(store, ProgressionConfig::default());

        assert_eq!(engine.state().level, MAX_LEVEL);
        assert!(engine.state().xp < engine.xp_required());

        let effects = engine.award_xp(engine.config().max_award, "capped", false);
        assert!(!notification_titles(&effects).contains(&"Level Up"));
        assert_eq!(engine.state().level, MAX_LEVEL);
        assert!(engine.state().xp < engine.xp_required());
    }

    #[test]
    fn test_unavailable_store_keeps_working_in_memory() {
        let mut engine = ProgressionEngine::load(MemoryStore::unavailable(), ProgressionConfig::default());

        engine.award_xp(150, "offline", false);
        engine.unlock(COPY_CHANNEL);

        assert_eq!(engine.state().level, 2);
        assert!(engine.state().is_unlocked(COPY_CHANNEL));
        assert_eq!(engine.reset_all(), vec![Effect::RestartRequested]);
    }

    #[test]
    fn test_reset_all_clears_store() {
        let mut engine = engine();
        engine.award_xp(120, "progress", false);
        assert!(engine.store().record().is_some());

        let effects = engine.reset_all();

        assert_eq!(effects, vec![Effect::RestartRequested]);
        assert!(engine.store().record().is_none());
        assert_eq!(engine.state(), &ProgressionState::default());
    }

    #[test]
    fn test_trophies_reflect_unlocks() {
        let mut engine = engine();
        engine.unlock(ENTER_NIGHT);

        let trophies = engine.trophies();
        assert_eq!(trophies.len(), ACHIEVEMENTS.len());
        assert!(trophies[0].unlocked);
        assert!(trophies[1..].iter().all(|t| !t.unlocked));
    }
}
