#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Utc;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;

use checkin::database::models::{
    AttendanceEntry, AttendanceRecord, MemberProfile, NewAttendance, Team,
};
use checkin::database::{AttendanceStore, MemoryStore, StoreError, Stores, TeamStore};
use checkin::middleware::RequestId;
use checkin::scanner::{
    CameraBackend, CameraDevice, DecodeStream, DeviceError, Frame, PreviewTransform, ScanOptions,
};
use checkin::{AppState, Config, routes};

pub fn member() -> MemberProfile {
    MemberProfile {
        full_name: Name().fake(),
        phone: PhoneNumber().fake(),
        email: SafeEmail().fake(),
    }
}

pub fn team(code: i64, name: &str, round: i32) -> Team {
    Team {
        id: code,
        team_name: name.to_string(),
        members: [member(), member()],
        code,
        round,
        round_time: format!("Round {} - {}:00", round, 9 + round),
        created_at: Some(Utc::now()),
    }
}

/// Memory store with Alpha (1001, round 1) and Beta (2002, round 2).
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_team(team(1001, "Alpha", 1)).unwrap();
    store.insert_team(team(2002, "Beta", 2)).unwrap();
    store
}

pub fn app_state(stores: Stores) -> web::Data<AppState> {
    web::Data::new(AppState::new(stores, &Config::test_config()))
}

/// Actix app wired like `main`, minus CORS and access logging.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(RequestId)
        .configure(routes::configure)
}

/// Team store that counts lookups before delegating.
pub struct CountingTeams {
    pub inner: Arc<MemoryStore>,
    pub calls: AtomicUsize,
}

impl CountingTeams {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeamStore for CountingTeams {
    async fn find_by_code(&self, code: i64) -> Result<Option<Team>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_code(code).await
    }
}

/// Team store that stalls long enough for a request to be abandoned.
pub struct SlowTeams {
    pub inner: Arc<MemoryStore>,
    pub delay: std::time::Duration,
}

#[async_trait]
impl TeamStore for SlowTeams {
    async fn find_by_code(&self, code: i64) -> Result<Option<Team>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_code(code).await
    }
}

/// Store whose every call fails.
pub struct BrokenStore;

#[async_trait]
impl TeamStore for BrokenStore {
    async fn find_by_code(&self, _code: i64) -> Result<Option<Team>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl AttendanceStore for BrokenStore {
    async fn record(&self, _input: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_with_teams(&self) -> Result<Vec<AttendanceEntry>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct FakeCameraState {
    pub devices: Vec<CameraDevice>,
    pub enumerate_error: Option<DeviceError>,
    pub grant_on_request: bool,
    pub open_error: Option<DeviceError>,
    pub frames: VecDeque<Result<Frame, DeviceError>>,
    /// Device id currently held by an open stream.
    pub held_by: Option<String>,
    pub opens: usize,
    pub releases: usize,
    pub open_streams: usize,
    pub max_open_streams: usize,
    pub frames_served: usize,
    pub last_preview: Option<PreviewTransform>,
    pub last_options: Option<ScanOptions>,
}

/// Scriptable camera backend. Clones share state, so a test can keep a
/// handle after moving one into a session.
#[derive(Debug, Clone, Default)]
pub struct FakeCamera {
    pub state: Arc<Mutex<FakeCameraState>>,
}

impl FakeCamera {
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        let camera = Self::default();
        camera.state().devices = devices;
        camera
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeCameraState> {
        self.state.lock().unwrap()
    }

    pub fn push_frames(&self, frames: impl IntoIterator<Item = Result<Frame, DeviceError>>) {
        self.state().frames.extend(frames);
    }

    pub fn is_held(&self) -> bool {
        self.state().held_by.is_some()
    }
}

#[async_trait]
impl CameraBackend for FakeCamera {
    async fn enumerate(&self) -> Result<Vec<CameraDevice>, DeviceError> {
        let state = self.state();
        match &state.enumerate_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.devices.clone()),
        }
    }

    async fn request_access(&self) -> Result<(), DeviceError> {
        let mut state = self.state();
        if state.grant_on_request {
            state.enumerate_error = None;
            Ok(())
        } else {
            Err(DeviceError::PermissionDenied("user dismissed prompt".to_string()))
        }
    }

    async fn open(
        &self,
        device: &CameraDevice,
        options: &ScanOptions,
        preview: PreviewTransform,
    ) -> Result<Box<dyn DecodeStream>, DeviceError> {
        let mut state = self.state();
        if let Some(err) = state.open_error.clone() {
            return Err(err);
        }
        if let Some(holder) = &state.held_by {
            return Err(DeviceError::StartFailed(format!("{} is busy", holder)));
        }

        state.held_by = Some(device.id.clone());
        state.opens += 1;
        state.open_streams += 1;
        state.max_open_streams = state.max_open_streams.max(state.open_streams);
        state.last_preview = Some(preview);
        state.last_options = Some(*options);

        Ok(Box::new(FakeStream {
            state: self.state.clone(),
            released: false,
        }))
    }
}

pub struct FakeStream {
    state: Arc<Mutex<FakeCameraState>>,
    released: bool,
}

#[async_trait]
impl DecodeStream for FakeStream {
    async fn next_frame(&mut self) -> Result<Frame, DeviceError> {
        let mut state = self.state.lock().unwrap();
        state.frames_served += 1;
        state
            .frames
            .pop_front()
            .unwrap_or_else(|| Err(DeviceError::StreamFailed("script exhausted".to_string())))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.state.lock().unwrap();
        state.held_by = None;
        state.releases += 1;
        state.open_streams -= 1;
    }
}

pub fn back_and_front() -> Vec<CameraDevice> {
    vec![
        CameraDevice::new("cam-front", "Front Camera").with_facing_hint("user"),
        CameraDevice::new("cam-back", "Back Camera").with_facing_hint("environment"),
    ]
}
