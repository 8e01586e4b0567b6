use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    error::AppError,
    handlers::shared::ApiResponse,
    middleware::CorrelationId,
    services::{AttendanceStatus, EntryMethod, StationView, TeamSummary},
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub code: String,
    pub method: EntryMethod,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub code: i64,
    pub team: TeamSummary,
    pub attendance: AttendanceStatus,
}

/// Look up the submitted code and record attendance.
pub async fn check_in(
    state: web::Data<AppState>,
    input: web::Json<CheckInRequest>,
    correlation_id: CorrelationId,
) -> Result<HttpResponse, AppError> {
    let CheckInRequest { code, method } = input.into_inner();
    let pending = state.station.track(&code);

    log::info!(
        "[{}] Check-in requested for code {:?} via {}",
        correlation_id,
        code,
        method
    );

    let outcome = match state.check_in.check_in(&code, method).await {
        Ok(outcome) => outcome,
        Err(err) => {
            pending.publish(StationView::Failed {
                code,
                error: err.to_string(),
            });
            return Err(err);
        }
    };

    let team = TeamSummary::now(&outcome.team);
    let attendance = AttendanceStatus::from_result(outcome.attendance);
    if !attendance.recorded {
        log::warn!(
            "[{}] Team {} found but attendance was not recorded",
            correlation_id,
            outcome.code
        );
    }

    pending.publish(StationView::Found {
        code,
        team: team.clone(),
        attendance: attendance.clone(),
    });

    let message = attendance.message.clone();
    Ok(ApiResponse::success_with_message(
        CheckInResponse {
            code: outcome.code,
            team,
            attendance,
        },
        &message,
    ))
}

pub async fn get_current(state: web::Data<AppState>) -> HttpResponse {
    ApiResponse::success(state.station.current())
}

/// Clear the station display so the next team can be checked.
pub async fn reset_current(state: web::Data<AppState>) -> HttpResponse {
    state.station.reset();
    ApiResponse::success(state.station.current())
}
