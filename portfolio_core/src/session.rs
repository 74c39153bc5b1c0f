//! Portfolio session - the engines wired together behind one facade.
//!
//! Engines only talk to each other through [`Effect::Progress`] and
//! [`Effect::RevealRequested`]. The session resolves both, drops audio cues
//! while sound is off, and hands everything else to the host.

use portfolio_rules::{BranchId, Size, SkillGraph, Zone};

use crate::config::EngineConfig;
use crate::effects::{Effect, HudSnapshot};
use crate::layout::{ActiveFilter, GeometrySource, GraphLayoutEngine, LineSet};
use crate::orbit::{OrbitEngine, OrbitFrame, OrbitNode};
use crate::progression::{Interaction, ProgressionEngine};
use crate::store::ProgressStore;

/// Intro flow: the surface stays hidden until the intro has played and the
/// player asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntroGate {
    pub entered: bool,
    pub intro_complete: bool,
    pub revealed: bool,
    pub auto_scrolled: bool,
}

pub struct PortfolioSession<S: ProgressStore> {
    progression: ProgressionEngine<S>,
    layout: GraphLayoutEngine,
    orbit: OrbitEngine,
    gate: IntroGate,
}

impl<S: ProgressStore> PortfolioSession<S> {
    pub fn new(store: S, graph: SkillGraph, config: &EngineConfig) -> Self {
        Self {
            progression: ProgressionEngine::load(store, config.progression.clone()),
            layout: GraphLayoutEngine::new(graph, config.layout.clone()),
            orbit: OrbitEngine::new(OrbitNode::canonical(), config.orbit.clone()),
            gate: IntroGate::default(),
        }
    }

    pub fn progression(&self) -> &ProgressionEngine<S> {
        &self.progression
    }

    pub fn layout(&self) -> &GraphLayoutEngine {
        &self.layout
    }

    pub fn orbit(&self) -> &OrbitEngine {
        &self.orbit
    }

    pub fn gate(&self) -> IntroGate {
        self.gate
    }

    pub fn hud(&self) -> HudSnapshot {
        self.progression.hud()
    }

    /// The player left the title screen. Only the first call counts.
    pub fn enter(&mut self) -> Vec<Effect> {
        if self.gate.entered {
            return Vec::new();
        }
        self.gate.entered = true;
        let effects = self.progression.handle(Interaction::EnteredPortfolio);
        self.dispatch(effects)
    }

    /// The intro transition finished playing.
    pub fn complete_intro(&mut self) {
        self.gate.intro_complete = true;
    }

    /// Reveal the interactive surface.
    ///
    /// Ignored before the intro completes and once revealed. The first reveal
    /// not asked to skip it scrolls to the about zone.
    pub fn reveal(&mut self, skip_auto_scroll: bool) -> Vec<Effect> {
        if !self.gate.intro_complete || self.gate.revealed {
            return Vec::new();
        }
        self.gate.revealed = true;
        tracing::debug!("Revealing portfolio surface");

        let mut effects = vec![Effect::RevealSurface];
        if !skip_auto_scroll && !self.gate.auto_scrolled {
            self.gate.auto_scrolled = true;
            effects.push(Effect::ScrollTo(Zone::About));
        }
        effects
    }

    /// Wheel, touch or paging input.
    pub fn scroll_intent(&mut self) -> Vec<Effect> {
        self.reveal(false)
    }

    /// A zone scrolled into view. Unknown zone ids are ignored.
    pub fn zone_visible(&mut self, zone_id: &str) -> Vec<Effect> {
        match Zone::from_id(zone_id) {
            Some(zone) => {
                let effects = self.progression.track_visit(zone);
                self.dispatch(effects)
            }
            None => Vec::new(),
        }
    }

    pub fn tick_orbit(&mut self, elapsed_secs: f64, container: Size) -> OrbitFrame {
        self.orbit.tick(elapsed_secs, container)
    }

    pub fn click_orbit(&mut self, index: usize) -> Vec<Effect> {
        let effects = self.orbit.click(index);
        self.dispatch(effects)
    }

    pub fn inspect_card(
        &mut self,
        branch: &BranchId,
        index: usize,
        geometry: &dyn GeometrySource,
    ) -> Vec<Effect> {
        let effects = self.layout.inspect_card(branch, index, geometry);
        self.dispatch(effects)
    }

    pub fn set_active_filter(
        &mut self,
        filter: Option<ActiveFilter>,
        geometry: &dyn GeometrySource,
    ) -> Vec<Effect> {
        self.layout.set_active_filter(filter, geometry)
    }

    pub fn toggle_tracked(&mut self, branch: &BranchId, geometry: &dyn GeometrySource) -> Vec<Effect> {
        self.layout.toggle_tracked(branch, geometry)
    }

    pub fn reset_selection(&mut self, geometry: &dyn GeometrySource) -> Vec<Effect> {
        self.layout.reset_selection(geometry)
    }

    pub fn select_planner(&mut self, key: &str, geometry: &dyn GeometrySource) -> Vec<Effect> {
        self.layout.select_planner(key, geometry)
    }

    /// Redraw after a resize, a scroll or the first render.
    pub fn recompute_layout(&self, geometry: &dyn GeometrySource) -> LineSet {
        self.layout.recompute_layout(geometry)
    }

    pub fn interact(&mut self, interaction: Interaction) -> Vec<Effect> {
        let effects = self.progression.handle(interaction);
        self.dispatch(effects)
    }

    pub fn toggle_sound(&mut self) -> Vec<Effect> {
        let effects = self.progression.toggle_sound();
        self.dispatch(effects)
    }

    pub fn reset_progress(&mut self) -> Vec<Effect> {
        self.progression.reset_all()
    }

    /// Resolve engine-to-engine effects and keep the host-facing ones.
    fn dispatch(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut out = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Progress(request) => {
                    let resolved = self.progression.apply(request);
                    out.extend(self.dispatch(resolved));
                }
                Effect::RevealRequested { skip_auto_scroll } => {
                    out.extend(self.reveal(skip_auto_scroll));
                }
                Effect::PlayCue(_) if !self.progression.sound_on() => {}
                other => out.push(other),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{notification_titles, Cue};
    use crate::layout::{NodeHandle, StaticGeometry};
    use crate::store::MemoryStore;
    use portfolio_rules::{Rect, SKILL_PERK_SELECTED, VISIT_ALL_ZONES};

    fn session() -> PortfolioSession<MemoryStore> {
        PortfolioSession::new(MemoryStore::new(), SkillGraph::portfolio(), &EngineConfig::default())
    }

    fn geometry() -> StaticGeometry {
        let mobile = BranchId::new("mobile");
        StaticGeometry::new()
            .with(NodeHandle::Canvas, Rect::new(0.0, 0.0, 600.0, 400.0))
            .with(NodeHandle::Root, Rect::new(250.0, 0.0, 100.0, 40.0))
            .with(NodeHandle::marker(&mobile), Rect::new(100.0, 100.0, 80.0, 20.0))
            .with(NodeHandle::card(&mobile, 0), Rect::new(150.0, 200.0, 200.0, 60.0))
    }

    fn has_progress_requests(effects: &[Effect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, Effect::Progress(_) | Effect::RevealRequested { .. }))
    }

    #[test]
    fn test_enter_counts_once() {
        let mut session = session();

        let first = session.enter();
        assert!(notification_titles(&first).contains(&"Trophy Unlocked"));
        assert_eq!(session.hud().xp, 45);

        assert!(session.enter().is_empty());
        assert_eq!(session.hud().xp, 45);
    }

    #[test]
    fn test_reveal_waits_for_intro() {
        let mut session = session();
        assert!(session.scroll_intent().is_empty());

        session.complete_intro();
        assert_eq!(
            session.scroll_intent(),
            vec![Effect::RevealSurface, Effect::ScrollTo(Zone::About)]
        );
        assert!(session.scroll_intent().is_empty());
        assert!(session.gate().auto_scrolled);
    }

    #[test]
    fn test_orbit_click_reveals_without_auto_scroll() {
        let mut session = session();
        session.complete_intro();

        let effects = session.click_orbit(2);

        assert_eq!(effects[0], Effect::RevealSurface);
        assert!(effects.contains(&Effect::ScrollTo(Zone::Skills)));
        assert!(!effects.contains(&Effect::ScrollTo(Zone::About)));
        assert!(!has_progress_requests(&effects));
        assert!(session.progression().state().visited_zones.contains(&Zone::Skills));
        assert_eq!(session.hud().xp, 10);
        assert!(!session.gate().auto_scrolled);
    }

    #[test]
    fn test_orbit_click_before_intro_still_rewards() {
        let mut session = session();
        let effects = session.click_orbit(0);

        assert!(!effects.contains(&Effect::RevealSurface));
        assert_eq!(notification_titles(&effects), vec!["+XP"]);
        assert_eq!(session.hud().xp, 10);
    }

    #[test]
    fn test_inspect_card_routes_rewards() {
        let mut session = session();
        let geometry = geometry();

        let effects = session.inspect_card(&BranchId::new("mobile"), 0, &geometry);

        assert!(!has_progress_requests(&effects));
        assert!(!effects.contains(&Effect::PlayCue(Cue::Confirm)));
        assert!(matches!(effects[0], Effect::ShowPerk { .. }));
        assert!(matches!(effects[1], Effect::DrawLines(_)));
        assert!(session.progression().state().is_unlocked(SKILL_PERK_SELECTED));
        // 8 for the perk, 20 for the trophy
        assert_eq!(session.hud().xp, 28);

        let again = session.inspect_card(&BranchId::new("mobile"), 0, &geometry);
        assert!(!notification_titles(&again).contains(&"Trophy Unlocked"));
        assert_eq!(session.hud().xp, 36);
    }

    #[test]
    fn test_cues_pass_once_sound_is_on() {
        let mut session = session();
        let geometry = geometry();
        session.toggle_sound();

        let effects = session.inspect_card(&BranchId::new("mobile"), 0, &geometry);
        assert!(effects.contains(&Effect::PlayCue(Cue::Confirm)));
    }

    #[test]
    fn test_zone_visibility_unlocks_explorer() {
        let mut session = session();

        assert!(session.zone_visible("hero").is_empty());
        for id in ["about", "projects", "skills"] {
            session.zone_visible(id);
        }
        assert!(!session.progression().state().is_unlocked(VISIT_ALL_ZONES));

        let effects = session.zone_visible("contact");
        assert_eq!(notification_titles(&effects), vec!["Trophy Unlocked"]);
    }

    #[test]
    fn test_progress_survives_a_new_session() {
        let mut session = session();
        session.interact(Interaction::CopiedChannel);
        let record = session.progression().store().record().unwrap().to_string();

        let resumed = PortfolioSession::new(
            MemoryStore::with_record(record),
            SkillGraph::portfolio(),
            &EngineConfig::default(),
        );
        assert_eq!(resumed.hud().xp, 30);
    }

    #[test]
    fn test_reset_progress() {
        let mut session = session();
        session.interact(Interaction::OpenedTrophies);

        assert_eq!(session.reset_progress(), vec![Effect::RestartRequested]);
        assert_eq!(session.hud().xp, 0);
        assert!(session.progression().store().record().is_none());
    }
}
