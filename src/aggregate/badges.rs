//! Achievement badge scoring.
//!
//! A fixed table of independent threshold rules evaluated against the
//! season report. Boundaries are inclusive; evaluation order never changes
//! the result set.

use crate::models::StatsReport;

/// One achievement rule: a name and a predicate over the report.
pub struct BadgeRule {
    pub name: &'static str,
    pub earned: fn(&StatsReport) -> bool,
}

/// The full badge table.
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        name: "CENTURY CLUB",
        earned: |r| r.total_points >= 2200,
    },
    BadgeRule {
        name: "GREEN MACHINE",
        earned: |r| r.green_arrows >= 20,
    },
    BadgeRule {
        name: "CAPTAIN MARVEL",
        earned: |r| r.captain_success_rate >= 75.0,
    },
    BadgeRule {
        name: "TOP MARKS",
        earned: |r| r.best_gameweek.is_some_and(|gw| gw.points >= 100),
    },
    BadgeRule {
        name: "ELITE MANAGER",
        earned: |r| r.overall_rank.is_some_and(|rank| rank <= 100_000),
    },
    BadgeRule {
        name: "TINKERMAN",
        earned: |r| r.transfers.total_transfers >= 40,
    },
    BadgeRule {
        name: "SET AND FORGET",
        earned: |r| r.transfers.total_transfers <= 10,
    },
    BadgeRule {
        name: "BENCH WARMER",
        earned: |r| r.bench_points >= 250,
    },
    BadgeRule {
        name: "CHIP CONNOISSEUR",
        earned: |r| r.chips_played >= 4,
    },
    BadgeRule {
        name: "ABOVE THE CURVE",
        earned: |r| r.points_above_average >= 200.0,
    },
];

/// Evaluate every rule against the report and return the earned badge
/// names. Never errors; no badges is an empty set.
pub fn score_badges(report: &StatsReport) -> Vec<String> {
    BADGE_RULES
        .iter()
        .filter(|rule| (rule.earned)(report))
        .map(|rule| rule.name.to_string())
        .collect()
}
