//! Season statistics derivation.
//!
//! Pure, synchronous functions over fetched season data:
//! - Player/team catalogue aggregates
//! - Chip usage and captaincy
//! - Transfer insights
//! - MVP and season-narrative extras (best/worst gameweek, bench, arrows)
//!
//! All "most X" scans resolve ties to the first entity encountered, using
//! strict-greater-than replacement. Unresolvable element ids are skipped,
//! never an error.

pub mod badges;

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;

use crate::models::{
    Bootstrap, ChipCaptainSlice, GameweekEvent, GameweekHistory, GameweekPicks, GameweekScore,
    ManagerHistory, ManagerSummary, MvpSlice, Player, PlayerCount, PlayerRef, PlayerStatsSlice,
    StatsReport, Team, Transfer, TransferSlice,
};

/// Aggregate the full player catalogue: count, mean points, top scorer,
/// raw extremes, and the most represented team.
pub fn aggregate_player_stats(players: &[Player], teams: &[Team]) -> PlayerStatsSlice {
    let player_count = players.len() as u32;

    let average_points = if players.is_empty() {
        0.0
    } else {
        players.iter().map(|p| p.total_points as i64).sum::<i64>() as f64 / players.len() as f64
    };

    let mut top_player: Option<&Player> = None;
    let mut highest_score = 0;
    let mut lowest_score = 0;
    for (i, p) in players.iter().enumerate() {
        if i == 0 {
            top_player = Some(p);
            highest_score = p.total_points;
            lowest_score = p.total_points;
            continue;
        }
        if p.total_points > highest_score {
            top_player = Some(p);
            highest_score = p.total_points;
        }
        if p.total_points < lowest_score {
            lowest_score = p.total_points;
        }
    }

    PlayerStatsSlice {
        player_count,
        average_points,
        top_player: top_player.map(|p| PlayerRef {
            name: p.display_name(),
            points: p.total_points,
        }),
        highest_score,
        lowest_score,
        most_popular_team: most_popular_team(players, teams),
    }
}

/// Team appearing most often among the player list. Players whose team id
/// does not resolve are excluded from the tally.
fn most_popular_team(players: &[Player], teams: &[Team]) -> Option<String> {
    let known: HashMap<u32, &Team> = teams.iter().map(|t| (t.id, t)).collect();

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for p in players {
        if known.contains_key(&p.team) {
            *counts.entry(p.team).or_insert(0) += 1;
        }
    }

    // Second pass in player order so ties go to the first team encountered
    let mut best: Option<(u32, u32)> = None;
    for p in players {
        if let Some(&count) = counts.get(&p.team) {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((p.team, count));
            }
        }
    }

    best.and_then(|(team_id, _)| known.get(&team_id).map(|t| t.name.clone()))
}

/// Tally chip usage across the season and pick out the most frequent
/// gameweek top element.
///
/// The top element stands in for "most captained" in the product surface,
/// an approximation inherited from the upstream data.
pub fn aggregate_chip_and_captain(events: &[GameweekEvent], players: &[Player]) -> ChipCaptainSlice {
    let mut chip_usage: BTreeMap<String, u32> = BTreeMap::new();
    for event in events {
        for chip in &event.chip_plays {
            *chip_usage.entry(chip.chip_name.clone()).or_insert(0) += chip.num_played;
        }
    }

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for event in events {
        if let Some(ref top) = event.top_element_info {
            *counts.entry(top.id).or_insert(0) += 1;
        }
    }

    let mut best: Option<(u32, u32)> = None;
    for event in events {
        if let Some(ref top) = event.top_element_info {
            let count = counts[&top.id];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((top.id, count));
            }
        }
    }

    let most_captained = best.and_then(|(id, count)| {
        players.iter().find(|p| p.id == id).map(|p| PlayerCount {
            name: p.display_name(),
            count,
        })
    });

    ChipCaptainSlice {
        chip_usage,
        most_captained,
    }
}

/// Count a manager's transfers and find the in/out leaders.
///
/// The total counts every transfer; the leaders only count swaps whose
/// element id resolves against the catalogue.
pub fn aggregate_transfer_insights(transfers: &[Transfer], players: &[Player]) -> TransferSlice {
    let catalogue: HashMap<u32, &Player> = players.iter().map(|p| (p.id, p)).collect();

    let mut in_counts: HashMap<u32, u32> = HashMap::new();
    let mut out_counts: HashMap<u32, u32> = HashMap::new();
    for t in transfers {
        if catalogue.contains_key(&t.element_in) {
            *in_counts.entry(t.element_in).or_insert(0) += 1;
        }
        if catalogue.contains_key(&t.element_out) {
            *out_counts.entry(t.element_out).or_insert(0) += 1;
        }
    }

    let leader = |counts: &HashMap<u32, u32>, pick: fn(&Transfer) -> u32| -> Option<PlayerCount> {
        let mut best: Option<(u32, u32)> = None;
        for t in transfers {
            let id = pick(t);
            if let Some(&count) = counts.get(&id) {
                if best.map_or(true, |(_, c)| count > c) {
                    best = Some((id, count));
                }
            }
        }
        best.map(|(id, count)| PlayerCount {
            name: catalogue[&id].display_name(),
            count,
        })
    };

    TransferSlice {
        total_transfers: transfers.len() as u32,
        most_transferred_in: leader(&in_counts, |t| t.element_in),
        most_transferred_out: leader(&out_counts, |t| t.element_out),
    }
}

/// The single pick with the highest contributed points across all
/// gameweeks. One best week, not a cumulative total.
pub fn aggregate_mvp(picks: &[GameweekPicks], players: &[Player]) -> Option<MvpSlice> {
    let mut best: Option<(&Player, i32, u32)> = None;
    for gw in picks {
        for pick in &gw.picks {
            let Some(player) = players.iter().find(|p| p.id == pick.element) else {
                continue;
            };
            if best.map_or(true, |(_, points, _)| pick.points > points) {
                best = Some((player, pick.points, gw.gameweek));
            }
        }
    }

    best.map(|(player, points, gameweek)| MvpSlice {
        player: player.display_name(),
        points,
        gameweek,
    })
}

/// Best and worst gameweeks from the manager's history rows.
pub fn best_and_worst_gameweek(
    history: &[GameweekHistory],
) -> (Option<GameweekScore>, Option<GameweekScore>) {
    let mut best: Option<GameweekScore> = None;
    let mut worst: Option<GameweekScore> = None;
    for row in history {
        let score = GameweekScore {
            gameweek: row.event,
            points: row.points,
        };
        if best.map_or(true, |b| score.points > b.points) {
            best = Some(score);
        }
        if worst.map_or(true, |w| score.points < w.points) {
            worst = Some(score);
        }
    }
    (best, worst)
}

/// Count gameweeks where overall rank improved (green) or worsened (red)
/// versus the previous row. The first row carries no arrow.
pub fn rank_arrows(history: &[GameweekHistory]) -> (u32, u32) {
    let mut green = 0;
    let mut red = 0;
    for pair in history.windows(2) {
        if let (Some(prev), Some(cur)) = (pair[0].overall_rank, pair[1].overall_rank) {
            if cur < prev {
                green += 1;
            } else if cur > prev {
                red += 1;
            }
        }
    }
    (green, red)
}

/// Percentage of gameweeks where the captain was the top-scoring pick of
/// that week (ties count as a success). `0.0` when no week has a captain.
pub fn captain_success_rate(picks: &[GameweekPicks]) -> f64 {
    let mut weeks_with_captain = 0u32;
    let mut successes = 0u32;
    for gw in picks {
        let Some(captain) = gw.captain() else {
            continue;
        };
        weeks_with_captain += 1;
        let max_points = gw.picks.iter().map(|p| p.points).max().unwrap_or(0);
        if captain.points >= max_points {
            successes += 1;
        }
    }

    if weeks_with_captain == 0 {
        0.0
    } else {
        successes as f64 / weeks_with_captain as f64 * 100.0
    }
}

/// The player this manager actually captained most often.
pub fn captain_favourite(picks: &[GameweekPicks], players: &[Player]) -> Option<PlayerCount> {
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for gw in picks {
        if let Some(captain) = gw.captain() {
            *counts.entry(captain.element).or_insert(0) += 1;
        }
    }

    let mut best: Option<(u32, u32)> = None;
    for gw in picks {
        if let Some(captain) = gw.captain() {
            let count = counts[&captain.element];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((captain.element, count));
            }
        }
    }

    best.and_then(|(id, count)| {
        players.iter().find(|p| p.id == id).map(|p| PlayerCount {
            name: p.display_name(),
            count,
        })
    })
}

/// The highest-scoring player the manager never owned. `None` when the
/// manager owned everyone (or the catalogue is empty).
pub fn one_that_got_away(picks: &[GameweekPicks], players: &[Player]) -> Option<PlayerRef> {
    let owned: HashSet<u32> = picks
        .iter()
        .flat_map(|gw| gw.picks.iter().map(|p| p.element))
        .collect();

    let mut best: Option<&Player> = None;
    for p in players {
        if owned.contains(&p.id) {
            continue;
        }
        if best.map_or(true, |b| p.total_points > b.total_points) {
            best = Some(p);
        }
    }

    best.map(|p| PlayerRef {
        name: p.display_name(),
        points: p.total_points,
    })
}

/// Manager total vs. the summed average manager score over finished
/// gameweeks.
pub fn points_above_average(total_points: i32, events: &[GameweekEvent]) -> f64 {
    let average_total: i64 = events
        .iter()
        .filter(|e| e.finished)
        .map(|e| e.average_entry_score as i64)
        .sum();
    total_points as f64 - average_total as f64
}

/// Compose the full season report from fetched data.
pub fn build_report(
    summary: &ManagerSummary,
    history: &ManagerHistory,
    picks: &[GameweekPicks],
    transfers: &[Transfer],
    bootstrap: &Bootstrap,
) -> StatsReport {
    let (best_gameweek, worst_gameweek) = best_and_worst_gameweek(&history.gameweeks);
    let (green_arrows, red_arrows) = rank_arrows(&history.gameweeks);

    let bench_points = history.gameweeks.iter().map(|g| g.points_on_bench).sum();
    let transfer_cost = history
        .gameweeks
        .iter()
        .map(|g| g.event_transfers_cost)
        .sum();

    let mut report = StatsReport {
        manager_id: summary.id,
        manager_name: summary.manager_name(),
        team_name: summary.team_name.clone(),
        total_points: summary.total_points,
        overall_rank: summary.overall_rank,
        players: aggregate_player_stats(&bootstrap.players, &bootstrap.teams),
        chips: aggregate_chip_and_captain(&bootstrap.events, &bootstrap.players),
        transfers: aggregate_transfer_insights(transfers, &bootstrap.players),
        mvp: aggregate_mvp(picks, &bootstrap.players),
        best_gameweek,
        worst_gameweek,
        bench_points,
        green_arrows,
        red_arrows,
        captain_success_rate: captain_success_rate(picks),
        captain_favourite: captain_favourite(picks, &bootstrap.players),
        one_that_got_away: one_that_got_away(picks, &bootstrap.players),
        transfer_cost,
        points_above_average: points_above_average(summary.total_points, &bootstrap.events),
        chips_played: history.chips.len() as u32,
        badges: Vec::new(),
        computed_at: Utc::now(),
    };

    report.badges = badges::score_badges(&report);
    report
}
