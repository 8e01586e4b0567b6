use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::database::models::{MemberProfile, Team};

/// Hour of day (local) after which a round counts as completed.
/// Rounds without an entry are always completed.
const ROUND_CUTOFF_HOURS: &[(i32, u32)] = &[(1, 12), (2, 14)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Upcoming,
    Completed,
}

/// Coarse status from the wall-clock hour alone; the team's `round_time` is
/// not consulted.
pub fn round_status(round: i32, hour: u32) -> RoundStatus {
    match ROUND_CUTOFF_HOURS.iter().find(|(r, _)| *r == round) {
        Some((_, cutoff)) if hour < *cutoff => RoundStatus::Upcoming,
        _ => RoundStatus::Completed,
    }
}

/// First letter of each whitespace-separated token, uppercased, at most two.
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    #[serde(flatten)]
    pub profile: MemberProfile,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: i64,
    pub code: i64,
    pub team_name: String,
    pub round: i32,
    pub round_time: String,
    pub round_status: RoundStatus,
    pub members: Vec<MemberSummary>,
}

impl TeamSummary {
    pub fn at_hour(team: &Team, hour: u32) -> Self {
        Self {
            id: team.id,
            code: team.code,
            team_name: team.team_name.clone(),
            round: team.round,
            round_time: team.round_time.clone(),
            round_status: round_status(team.round, hour),
            members: team
                .members
                .iter()
                .map(|profile| MemberSummary {
                    initials: initials(&profile.full_name),
                    profile: profile.clone(),
                })
                .collect(),
        }
    }

    pub fn now(team: &Team) -> Self {
        Self::at_hour(team, Local::now().hour())
    }
}
