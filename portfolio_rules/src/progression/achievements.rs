//! Achievement catalog.

use serde::Serialize;

pub const ENTER_NIGHT: &str = "enter_night";
pub const VISIT_ALL_ZONES: &str = "visit_all_zones";
pub const INSPECT_3_PROJECTS: &str = "inspect_3_projects";
pub const COPY_CHANNEL: &str = "copy_channel";
pub const SKILL_PERK_SELECTED: &str = "skill_perk_selected";
pub const TOGGLE_SOUND: &str = "toggle_sound";

/// A static achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Every achievement that can be unlocked, in display order.
pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: ENTER_NIGHT,
        name: "First Contact",
        description: "Entered the portfolio.",
    },
    Achievement {
        id: VISIT_ALL_ZONES,
        name: "World Explorer",
        description: "Visited About, Projects, Skills, and Contact.",
    },
    Achievement {
        id: INSPECT_3_PROJECTS,
        name: "Investigator",
        description: "Inspected 3 project missions.",
    },
    Achievement {
        id: COPY_CHANNEL,
        name: "Comms Operator",
        description: "Copied a contact channel.",
    },
    Achievement {
        id: SKILL_PERK_SELECTED,
        name: "Perk Unlocked",
        description: "Selected a skill perk node.",
    },
    Achievement {
        id: TOGGLE_SOUND,
        name: "Audio Online",
        description: "Enabled the sound system.",
    },
];

/// Look up an achievement by id.
pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}
