use actix_web::{HttpResponse, http::header, web};
use chrono::{Local, Utc};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    handlers::shared::ApiResponse,
    services::dashboard::{
        AttendanceFilter, EXPORT_CONTENT_TYPE, RoundFilter, export_csv, export_filename,
    },
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub search: Option<String>,
    pub round: Option<String>,
}

impl AttendanceQuery {
    pub fn to_filter(&self) -> Result<AttendanceFilter, AppError> {
        let round = match &self.round {
            Some(round) => round.parse::<RoundFilter>()?,
            None => RoundFilter::All,
        };
        Ok(AttendanceFilter::new(
            self.search.clone().unwrap_or_default(),
            round,
        ))
    }
}

/// Attendance records, newest first, filtered by search text and round.
pub async fn get_attendance(
    state: web::Data<AppState>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.to_filter()?;
    let entries = state.dashboard.filtered(&filter).await?;

    Ok(ApiResponse::success(entries))
}

/// CSV download of the filtered records.
pub async fn export_attendance(
    state: web::Data<AppState>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.to_filter()?;
    let entries = state.dashboard.filtered(&filter).await?;

    let filename = export_filename(Utc::now());
    log::info!("Exporting {} attendance record(s) as {}", entries.len(), filename);

    Ok(HttpResponse::Ok()
        .content_type(EXPORT_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(export_csv(&entries, &Local)))
}
