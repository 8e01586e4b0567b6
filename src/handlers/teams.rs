use actix_web::{HttpResponse, web};

use crate::{
    AppState, error::AppError, handlers::shared::ApiResponse, services::TeamSummary,
    services::code_input::parse_team_code,
};

/// Read-only lookup; does not record attendance.
pub async fn get_team_by_code(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = parse_team_code(&path.into_inner())?;
    let team = state.check_in.lookup(code).await?;

    Ok(ApiResponse::success(TeamSummary::now(&team)))
}
