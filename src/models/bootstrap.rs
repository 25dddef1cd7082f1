//! Global bootstrap entities: players, teams, gameweek events.
//!
//! These mirror the shapes returned by the upstream `bootstrap-static`
//! endpoint. Deserialization happens once at the fetch boundary; everything
//! downstream works with these typed snapshots.

use serde::{Deserialize, Serialize};

/// A footballer in the season's player catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Upstream element id
    pub id: u32,

    pub first_name: String,

    pub second_name: String,

    /// Short display name shown on the site
    #[serde(default)]
    pub web_name: String,

    /// Team this player belongs to
    pub team: u32,

    /// Season points total (negative totals are possible via deductions)
    pub total_points: i32,
}

impl Player {
    /// Preferred display name: the web name, falling back to "First Last".
    pub fn display_name(&self) -> String {
        if self.web_name.is_empty() {
            format!("{} {}", self.first_name, self.second_name)
        } else {
            self.web_name.clone()
        }
    }
}

/// A Premier League club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub short_name: String,
}

/// Chip usage tally for one gameweek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipPlay {
    pub chip_name: String,

    pub num_played: u32,
}

/// Reference to the top-scoring element of a gameweek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopElementInfo {
    pub id: u32,

    pub points: i32,
}

/// One scheduled round of fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekEvent {
    /// Gameweek number (1-based)
    pub id: u32,

    #[serde(default)]
    pub finished: bool,

    /// Chip usage across all managers this gameweek
    #[serde(default)]
    pub chip_plays: Vec<ChipPlay>,

    /// Top-scoring element of the gameweek, when decided
    #[serde(default)]
    pub top_element_info: Option<TopElementInfo>,

    /// Average manager score for the gameweek
    #[serde(default)]
    pub average_entry_score: i32,

    /// Highest manager score for the gameweek
    #[serde(default)]
    pub highest_score: Option<i32>,
}

/// The global bootstrap payload: everything needed to resolve ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bootstrap {
    #[serde(rename = "elements")]
    pub players: Vec<Player>,

    pub teams: Vec<Team>,

    pub events: Vec<GameweekEvent>,
}

impl Bootstrap {
    /// Look up a player by element id.
    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Gameweeks that have finished, in ascending order.
    pub fn finished_events(&self) -> Vec<&GameweekEvent> {
        self.events.iter().filter(|e| e.finished).collect()
    }
}
