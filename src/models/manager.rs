//! Per-manager entities: summary, gameweek history, picks, transfers.

use serde::{Deserialize, Serialize};

/// Aggregate manager fields from the upstream entry endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerSummary {
    pub id: u64,

    #[serde(rename = "player_first_name")]
    pub first_name: String,

    #[serde(rename = "player_last_name")]
    pub last_name: String,

    /// The manager's fantasy team name
    #[serde(rename = "name")]
    pub team_name: String,

    #[serde(rename = "summary_overall_points", default)]
    pub total_points: i32,

    /// Missing until the first gameweek has been scored
    #[serde(rename = "summary_overall_rank", default)]
    pub overall_rank: Option<u64>,
}

impl ManagerSummary {
    pub fn manager_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One chip activation from the manager's season history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipUse {
    pub name: String,

    /// Gameweek the chip was played in
    pub event: u32,
}

/// One row of the manager's per-gameweek history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekHistory {
    /// Gameweek number
    pub event: u32,

    /// Points scored this gameweek (net of transfer costs)
    pub points: i32,

    pub total_points: i32,

    #[serde(default)]
    pub overall_rank: Option<u64>,

    #[serde(default)]
    pub points_on_bench: i32,

    #[serde(default)]
    pub event_transfers: u32,

    /// Points deducted for extra transfers this gameweek
    #[serde(default)]
    pub event_transfers_cost: i32,
}

/// Full season history for a manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerHistory {
    #[serde(rename = "current")]
    pub gameweeks: Vec<GameweekHistory>,

    #[serde(default)]
    pub chips: Vec<ChipUse>,
}

/// A single squad slot for one gameweek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerPick {
    /// Element id of the picked player
    pub element: u32,

    /// Points the pick contributed (multiplier applied)
    #[serde(default)]
    pub points: i32,

    /// 0 = benched, 1 = started, 2 = captain, 3 = triple captain
    #[serde(default = "default_multiplier")]
    pub multiplier: u8,

    #[serde(default)]
    pub is_captain: bool,
}

fn default_multiplier() -> u8 {
    1
}

impl ManagerPick {
    pub fn is_benched(&self) -> bool {
        self.multiplier == 0
    }
}

/// All picks a manager made for one gameweek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekPicks {
    pub gameweek: u32,

    pub picks: Vec<ManagerPick>,
}

impl GameweekPicks {
    /// The captain pick for this gameweek, if one is flagged.
    pub fn captain(&self) -> Option<&ManagerPick> {
        self.picks.iter().find(|p| p.is_captain)
    }

    /// Picks that made it onto the pitch.
    pub fn starters(&self) -> impl Iterator<Item = &ManagerPick> {
        self.picks.iter().filter(|p| !p.is_benched())
    }
}

/// One player swap by a manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub element_in: u32,

    pub element_out: u32,

    /// Gameweek the transfer applied to
    pub event: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_summary_deserializes_upstream_shape() {
        let raw = r#"{
            "id": 1178124,
            "player_first_name": "Sarah",
            "player_last_name": "Chen",
            "name": "Chen's Eleven",
            "summary_overall_points": 2317,
            "summary_overall_rank": 54211
        }"#;

        let summary: ManagerSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.id, 1178124);
        assert_eq!(summary.manager_name(), "Sarah Chen");
        assert_eq!(summary.team_name, "Chen's Eleven");
        assert_eq!(summary.total_points, 2317);
        assert_eq!(summary.overall_rank, Some(54211));
    }

    #[test]
    fn test_manager_summary_missing_rank() {
        let raw = r#"{
            "id": 7,
            "player_first_name": "New",
            "player_last_name": "Manager",
            "name": "Fresh Start"
        }"#;

        let summary: ManagerSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.total_points, 0);
        assert!(summary.overall_rank.is_none());
    }

    #[test]
    fn test_history_deserializes_current_and_chips() {
        let raw = r#"{
            "current": [
                {"event": 1, "points": 65, "total_points": 65,
                 "overall_rank": 900000, "points_on_bench": 7,
                 "event_transfers": 0, "event_transfers_cost": 0},
                {"event": 2, "points": 81, "total_points": 146,
                 "overall_rank": 400000, "points_on_bench": 12,
                 "event_transfers": 2, "event_transfers_cost": 4}
            ],
            "chips": [{"name": "wildcard", "event": 9}]
        }"#;

        let history: ManagerHistory = serde_json::from_str(raw).unwrap();
        assert_eq!(history.gameweeks.len(), 2);
        assert_eq!(history.gameweeks[1].event_transfers_cost, 4);
        assert_eq!(history.chips[0].name, "wildcard");
    }

    #[test]
    fn test_pick_defaults() {
        let raw = r#"{"element": 233}"#;
        let pick: ManagerPick = serde_json::from_str(raw).unwrap();

        assert_eq!(pick.multiplier, 1);
        assert_eq!(pick.points, 0);
        assert!(!pick.is_captain);
        assert!(!pick.is_benched());
    }

    #[test]
    fn test_gameweek_picks_captain_lookup() {
        let gw = GameweekPicks {
            gameweek: 3,
            picks: vec![
                ManagerPick {
                    element: 1,
                    points: 6,
                    multiplier: 1,
                    is_captain: false,
                },
                ManagerPick {
                    element: 2,
                    points: 24,
                    multiplier: 2,
                    is_captain: true,
                },
                ManagerPick {
                    element: 3,
                    points: 2,
                    multiplier: 0,
                    is_captain: false,
                },
            ],
        };

        assert_eq!(gw.captain().unwrap().element, 2);
        assert_eq!(gw.starters().count(), 2);
    }

    #[test]
    fn test_transfer_roundtrip() {
        let transfer = Transfer {
            element_in: 233,
            element_out: 311,
            event: 12,
        };

        let json = serde_json::to_string(&transfer).unwrap();
        let parsed: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.element_in, 233);
        assert_eq!(parsed.event, 12);
    }
}
