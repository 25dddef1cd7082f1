//! Derived season report models.
//!
//! The `StatsReport` is the rendering layer's only input: created fresh per
//! aggregation call, consumed once, never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named player with a points value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub name: String,
    pub points: i32,
}

/// A named player with an occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCount {
    pub name: String,
    pub count: u32,
}

/// A gameweek with its points score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekScore {
    pub gameweek: u32,
    pub points: i32,
}

/// Global player/team aggregates over the full catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatsSlice {
    /// Number of players in the catalogue
    pub player_count: u32,

    /// Arithmetic mean of season points across all players
    pub average_points: f64,

    /// Highest-scoring player; `None` only for an empty catalogue
    pub top_player: Option<PlayerRef>,

    pub highest_score: i32,

    pub lowest_score: i32,

    /// Team appearing most often in the catalogue
    pub most_popular_team: Option<String>,
}

/// Season-wide chip usage and the most-captained player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipCaptainSlice {
    /// Chip name → total plays across the season
    pub chip_usage: BTreeMap<String, u32>,

    /// Derived from per-gameweek top elements, an upstream approximation
    pub most_captained: Option<PlayerCount>,
}

/// Transfer activity aggregates for one manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSlice {
    /// Every recorded transfer counts, resolvable or not
    pub total_transfers: u32,

    pub most_transferred_in: Option<PlayerCount>,

    pub most_transferred_out: Option<PlayerCount>,
}

/// The single best pick of the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MvpSlice {
    pub player: String,

    /// Points that one pick contributed
    pub points: i32,

    pub gameweek: u32,
}

/// Flat season report consumed by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub manager_id: u64,
    pub manager_name: String,
    pub team_name: String,
    pub total_points: i32,
    pub overall_rank: Option<u64>,

    pub players: PlayerStatsSlice,
    pub chips: ChipCaptainSlice,
    pub transfers: TransferSlice,
    pub mvp: Option<MvpSlice>,

    pub best_gameweek: Option<GameweekScore>,
    pub worst_gameweek: Option<GameweekScore>,

    /// Points left on the bench across the season
    pub bench_points: i32,

    /// Gameweeks where overall rank improved / worsened
    pub green_arrows: u32,
    pub red_arrows: u32,

    /// Percentage of gameweeks where the captain was the right call
    pub captain_success_rate: f64,

    /// The player this manager actually captained most often
    pub captain_favourite: Option<PlayerCount>,

    /// Best player the manager never owned
    pub one_that_got_away: Option<PlayerRef>,

    /// Total points deducted for transfers
    pub transfer_cost: i32,

    /// Total points vs. the summed per-gameweek average manager score
    pub points_above_average: f64,

    /// Chips the manager played this season
    pub chips_played: u32,

    pub badges: Vec<String>,

    pub computed_at: DateTime<Utc>,
}
