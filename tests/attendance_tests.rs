use std::sync::Arc;

use actix_web::{http::StatusCode, http::header, test};
use pretty_assertions::assert_eq;

use checkin::database::models::{AttendanceEntry, NewAttendance};
use checkin::database::{AttendanceStore, MemoryStore, Stores};
use checkin::handlers::shared::ApiResponse;
use checkin::services::EntryMethod;

mod common;

const HEADER: &str = "Team Code,Team Name,Round,Round Time,Check-in Time,Location,Notes";

/// Alpha checked in by scan, then Beta by manual entry.
async fn store_with_check_ins() -> Arc<MemoryStore> {
    let store = common::seeded_store();
    let state = common::app_state(Stores::memory(store.clone()));

    state
        .check_in
        .check_in("1001", EntryMethod::QrScan)
        .await
        .unwrap();
    state
        .check_in
        .check_in("2002", EntryMethod::ManualEntry)
        .await
        .unwrap();
    store
}

async fn list(store: Arc<MemoryStore>, query: &str) -> (StatusCode, Option<Vec<AttendanceEntry>>) {
    let app =
        test::init_service(common::create_app(common::app_state(Stores::memory(store)))).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance{}", query))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: ApiResponse<Vec<AttendanceEntry>> = test::read_body_json(resp).await;
    (status, body.data)
}

async fn export(store: Arc<MemoryStore>, query: &str) -> (String, String, String) {
    let app =
        test::init_service(common::create_app(common::app_state(Stores::memory(store)))).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/export{}", query))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = test::read_body(resp).await;
    (
        content_type,
        disposition,
        String::from_utf8(body.to_vec()).unwrap(),
    )
}

#[actix_web::test]
async fn lists_newest_first_with_team_join() {
    let store = store_with_check_ins().await;
    store
        .record(NewAttendance {
            team_code: 5555,
            location: "Side Door".to_string(),
            notes: "walk-up".to_string(),
        })
        .await
        .unwrap();

    let (status, data) = list(store, "").await;
    assert_eq!(status, StatusCode::OK);

    let entries = data.unwrap();
    let codes: Vec<i64> = entries.iter().map(|e| e.record.team_code).collect();
    assert_eq!(codes, vec![5555, 2002, 1001]);
    assert!(entries[0].team.is_none());
    assert_eq!(entries[1].team.as_ref().unwrap().team_name, "Beta");
}

#[actix_web::test]
async fn text_filter_alpha_returns_only_1001() {
    let (_, data) = list(store_with_check_ins().await, "?search=alpha").await;
    let entries = data.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record.team_code, 1001);
}

#[actix_web::test]
async fn round_filter_two_returns_only_2002() {
    let (_, data) = list(store_with_check_ins().await, "?round=2").await;
    let entries = data.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record.team_code, 2002);
}

#[actix_web::test]
async fn round_all_disables_round_filter() {
    let (_, data) = list(store_with_check_ins().await, "?round=all").await;
    assert_eq!(data.unwrap().len(), 2);
}

#[actix_web::test]
async fn invalid_round_is_rejected() {
    let (status, data) = list(store_with_check_ins().await, "?round=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(data.is_none());
}

#[actix_web::test]
async fn export_of_empty_selection_is_header_only() {
    let (content_type, disposition, body) =
        export(store_with_check_ins().await, "?search=zzz").await;

    assert!(content_type.starts_with("text/csv"));
    assert!(disposition.starts_with("attachment; filename=\"attendance_export_"));
    assert!(disposition.ends_with(".csv\""));
    assert_eq!(body, format!("{}\n", HEADER));
}

#[actix_web::test]
async fn export_has_header_plus_one_line_per_filtered_record() {
    let (_, _, body) = export(store_with_check_ins().await, "").await;
    let lines: Vec<&str> = body.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("2002,Beta,2,"));
    assert!(lines[1].ends_with(",Check-in Station,Checked in via manual entry"));
    assert!(lines[2].starts_with("1001,Alpha,1,"));
    assert!(lines[2].ends_with(",Check-in Station,Checked in via QR scan"));
}

#[actix_web::test]
async fn export_only_includes_filtered_rows() {
    let (_, _, body) = export(store_with_check_ins().await, "?round=1").await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1001,Alpha,1,"));
}

#[actix_web::test]
async fn export_quotes_notes_with_quotes() {
    let store = common::seeded_store();
    store
        .record(NewAttendance {
            team_code: 1001,
            location: "Gate, North".to_string(),
            notes: "He said \"hi\"".to_string(),
        })
        .await
        .unwrap();

    let (_, _, body) = export(store, "").await;
    let row = body.lines().nth(1).unwrap();
    assert!(row.ends_with(",\"Gate, North\",\"He said \"\"hi\"\"\""));
}

#[actix_web::test]
async fn store_failure_surfaces_as_server_error() {
    let stores = Stores {
        teams: common::seeded_store(),
        attendance: Arc::new(common::BrokenStore),
    };
    let app = test::init_service(common::create_app(common::app_state(stores))).await;

    let req = test::TestRequest::get().uri("/api/v1/attendance").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
