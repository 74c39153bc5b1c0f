//! Rewarded user interactions outside the skill tree and the orbit.

use serde::{Deserialize, Serialize};

use portfolio_rules::{COPY_CHANNEL, ENTER_NIGHT};

use super::{ProgressionConfig, ProgressionEngine};
use crate::effects::Effect;
use crate::store::ProgressStore;

/// Something the player did that the progression layer rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Left the intro for the portfolio itself.
    EnteredPortfolio,
    /// Copied a contact channel to the clipboard.
    CopiedChannel,
    /// Jumped to a random project.
    RandomMission,
    /// Changed the project filter or sort.
    AdjustedProjectView,
    DownloadedResume,
    OpenedTrophies,
    /// Opened a project's details.
    InspectedProject,
}

impl Interaction {
    /// XP granted for the interaction.
    pub fn xp(&self, config: &ProgressionConfig) -> i64 {
        match self {
            Interaction::EnteredPortfolio => config.entry_xp,
            Interaction::CopiedChannel => config.copy_channel_xp,
            Interaction::RandomMission => config.random_mission_xp,
            Interaction::AdjustedProjectView => config.project_view_xp,
            Interaction::DownloadedResume => config.resume_xp,
            Interaction::OpenedTrophies => config.trophies_xp,
            Interaction::InspectedProject => config.inspection_xp,
        }
    }

    /// Reason shown with the award.
    pub fn reason(&self) -> &'static str {
        match self {
            Interaction::EnteredPortfolio => "Entered portfolio",
            Interaction::CopiedChannel => "Copied channel",
            Interaction::RandomMission => "Random mission",
            Interaction::AdjustedProjectView => "Adjusted projects",
            Interaction::DownloadedResume => "Downloaded resume",
            Interaction::OpenedTrophies => "Opened trophies",
            Interaction::InspectedProject => "Inspected project",
        }
    }

    /// Whether the interaction plays the confirm cue.
    pub fn has_cue(&self) -> bool {
        !matches!(
            self,
            Interaction::EnteredPortfolio | Interaction::AdjustedProjectView
        )
    }
}

impl<S: ProgressStore> ProgressionEngine<S> {
    /// Reward an interaction.
    pub fn handle(&mut self, interaction: Interaction) -> Vec<Effect> {
        tracing::debug!("Handling interaction {:?}", interaction);

        let xp = interaction.xp(self.config());
        let mut effects = Vec::new();
        match interaction {
            Interaction::EnteredPortfolio => {
                effects.extend(self.unlock(ENTER_NIGHT));
                effects.extend(self.award_xp(xp, interaction.reason(), false));
            }
            Interaction::InspectedProject => {
                self.count_project_inspection();
                effects.extend(self.award_xp(xp, interaction.reason(), false));
                self.push_cue(&mut effects);
                effects.extend(self.unlock_investigator_if_earned());
            }
            Interaction::CopiedChannel => {
                effects.extend(self.award_xp(xp, interaction.reason(), false));
                self.push_cue(&mut effects);
                effects.extend(self.unlock(COPY_CHANNEL));
            }
            _ => {
                effects.extend(self.award_xp(xp, interaction.reason(), false));
                if interaction.has_cue() {
                    self.push_cue(&mut effects);
                }
            }
        }
        effects
    }
}
