use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// How a team code reached the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMethod {
    QrScan,
    ManualEntry,
}

impl EntryMethod {
    /// Text stored in the attendance notes column.
    pub fn note(&self) -> String {
        format!("Checked in via {}", self)
    }
}

impl std::fmt::Display for EntryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryMethod::QrScan => write!(f, "QR scan"),
            EntryMethod::ManualEntry => write!(f, "manual entry"),
        }
    }
}

/// Validate keyboard input before it is submitted. Returns the trimmed code.
pub fn validate_manual_code(input: &str) -> Result<&str, AppError> {
    let code = input.trim();

    if code.is_empty() {
        return Err(AppError::Validation("Please enter a team code".to_string()));
    }

    if !NUMERIC.is_match(code) {
        return Err(AppError::Validation(
            "Team code must be numeric".to_string(),
        ));
    }

    Ok(code)
}

/// Parse a candidate code into the numeric access code used for lookup.
pub fn parse_team_code(candidate: &str) -> Result<i64, AppError> {
    let invalid =
        || AppError::Validation("Invalid code format. Please enter a valid team code.".to_string());

    let candidate = candidate.trim();
    if !NUMERIC.is_match(candidate) {
        return Err(invalid());
    }

    candidate.parse::<i64>().map_err(|_| invalid())
}

/// Apply the checks for `method` and produce the access code.
pub fn read_code(candidate: &str, method: EntryMethod) -> Result<i64, AppError> {
    match method {
        EntryMethod::ManualEntry => parse_team_code(validate_manual_code(candidate)?),
        EntryMethod::QrScan => parse_team_code(candidate),
    }
}
