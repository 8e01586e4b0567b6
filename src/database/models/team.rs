use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details for one of the two people registered on a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub team_name: String,
    pub members: [MemberProfile; 2],
    pub code: i64, // access code, unique; not the id
    pub round: i32,
    pub round_time: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Team fields carried alongside an attendance record by the dashboard join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub team_name: String,
    pub round: i32,
    pub round_time: String,
}

impl From<&Team> for TeamRef {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.team_name.clone(),
            round: team.round,
            round_time: team.round_time.clone(),
        }
    }
}
