//! Camera session state machine.
//!
//! ```text
//! Uninitialized -> Enumerating -> PermissionDenied | NoCameras | Ready
//! Ready -> Starting -> Scanning -> Stopping -> Ready
//! any -> Stopped (shutdown)
//! ```
//!
//! The session owns at most one [`DecodeStream`] at a time, wrapped in a guard
//! that releases the device when dropped.

use super::backend::{
    CameraBackend, DecodeStream, DeviceError, Frame, PreviewTransform, ScanOptions,
};
use super::device::{CameraDevice, Facing, select_default_camera};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Uninitialized,
    Enumerating,
    PermissionDenied,
    NoCameras,
    Ready,
    Starting,
    Scanning,
    Stopping,
    Stopped,
}

/// Holds an open stream; releasing on drop covers every exit path.
struct StreamGuard {
    stream: Box<dyn DecodeStream>,
}

impl StreamGuard {
    fn new(stream: Box<dyn DecodeStream>) -> Self {
        Self { stream }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.release();
    }
}

pub struct CameraSession<B> {
    backend: B,
    options: ScanOptions,
    state: ScanState,
    cameras: Vec<CameraDevice>,
    active: Option<usize>,
    stream: Option<StreamGuard>,
    decoded: u64,
}

impl<B: CameraBackend> CameraSession<B> {
    pub fn new(backend: B, options: ScanOptions) -> Self {
        Self {
            backend,
            options,
            state: ScanState::Uninitialized,
            cameras: Vec::new(),
            active: None,
            stream: None,
            decoded: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn cameras(&self) -> &[CameraDevice] {
        &self.cameras
    }

    pub fn active_camera(&self) -> Option<&CameraDevice> {
        self.active.and_then(|i| self.cameras.get(i))
    }

    /// Number of payloads handed to the caller so far.
    pub fn decoded_count(&self) -> u64 {
        self.decoded
    }

    pub fn is_scanning(&self) -> bool {
        self.stream.is_some()
    }

    /// Front-facing cameras get a mirrored preview.
    pub fn preview_transform(&self) -> PreviewTransform {
        match self.active_camera().map(CameraDevice::facing) {
            Some(Facing::Front) => PreviewTransform::Mirrored,
            _ => PreviewTransform::None,
        }
    }

    /// Enumerate cameras and pick the default one. Also used as the manual
    /// retry from `NoCameras`.
    pub async fn initialize(&mut self) -> ScanState {
        self.release_stream();
        self.state = ScanState::Enumerating;

        match self.backend.enumerate().await {
            Ok(devices) if devices.is_empty() => {
                log::warn!("No cameras detected");
                self.cameras.clear();
                self.active = None;
                self.state = ScanState::NoCameras;
            }
            Ok(devices) => {
                self.active = select_default_camera(&devices);
                self.cameras = devices;
                if let Some(camera) = self.active_camera() {
                    log::info!(
                        "Found {} camera(s), defaulting to {} ({:?})",
                        self.cameras.len(),
                        camera.label,
                        camera.facing()
                    );
                }
                self.state = ScanState::Ready;
            }
            Err(err) if err.is_permission() => {
                log::warn!("Camera enumeration refused: {}", err);
                self.state = ScanState::PermissionDenied;
            }
            Err(err) => {
                log::error!("Camera enumeration failed: {}", err);
                self.cameras.clear();
                self.active = None;
                self.state = ScanState::NoCameras;
            }
        }

        self.state
    }

    /// Re-request camera access, then enumerate again on success.
    pub async fn grant_access(&mut self) -> Result<ScanState, DeviceError> {
        if let Err(err) = self.backend.request_access().await {
            log::warn!("Camera access not granted: {}", err);
            self.state = ScanState::PermissionDenied;
            return Err(err);
        }
        Ok(self.initialize().await)
    }

    /// Open a decode loop on the active camera. A running loop is stopped
    /// first, so there is never more than one.
    pub async fn start(&mut self) -> Result<(), DeviceError> {
        if self.stream.is_some() {
            self.stop();
        }

        let device = match (self.state, self.active_camera()) {
            (ScanState::Ready, Some(device)) => device.clone(),
            (ScanState::Ready, None) | (ScanState::NoCameras, _) => {
                return Err(DeviceError::NoCamera);
            }
            (ScanState::PermissionDenied, _) => {
                return Err(DeviceError::PermissionDenied(
                    "camera access has not been granted".to_string(),
                ));
            }
            (state, _) => {
                return Err(DeviceError::StartFailed(format!(
                    "cannot start from {:?}",
                    state
                )));
            }
        };

        self.state = ScanState::Starting;
        let preview = self.preview_transform();

        match self.backend.open(&device, &self.options, preview).await {
            Ok(stream) => {
                log::debug!(
                    "Scanning on {} at {} fps, {}px box",
                    device.label,
                    self.options.fps,
                    self.options.qr_box
                );
                self.stream = Some(StreamGuard::new(stream));
                self.state = ScanState::Scanning;
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to start camera {}: {}", device.label, err);
                self.state = if err.is_permission() {
                    ScanState::PermissionDenied
                } else {
                    ScanState::Ready
                };
                Err(err)
            }
        }
    }

    /// Sample frames until one decodes. The loop is torn down before the
    /// payload is returned, so each session yields it exactly once.
    pub async fn next_code(&mut self) -> Result<String, DeviceError> {
        loop {
            let Some(guard) = self.stream.as_mut() else {
                return Err(DeviceError::NotScanning);
            };

            match guard.stream.next_frame().await {
                Ok(Frame::Decoded(payload)) => {
                    self.stop();
                    self.decoded += 1;
                    return Ok(payload);
                }
                Ok(Frame::Empty) => continue,
                Err(err) => {
                    log::error!("Scanning stopped: {}", err);
                    self.release_stream();
                    self.state = if err.is_permission() {
                        ScanState::PermissionDenied
                    } else {
                        ScanState::Ready
                    };
                    return Err(err);
                }
            }
        }
    }

    /// Make another camera active. If scanning, the current loop is stopped
    /// before one is started on the new camera.
    pub async fn switch_camera(&mut self, device_id: &str) -> Result<(), DeviceError> {
        let index = self
            .cameras
            .iter()
            .position(|c| c.id == device_id)
            .ok_or_else(|| DeviceError::UnknownDevice(device_id.to_string()))?;

        let was_scanning = self.stream.is_some();
        if was_scanning {
            self.stop();
        }

        self.active = Some(index);

        if was_scanning {
            self.start().await?;
        }
        Ok(())
    }

    /// Stop scanning and release the camera. No-op when idle.
    pub fn stop(&mut self) {
        if self.stream.is_none() {
            return;
        }
        self.state = ScanState::Stopping;
        self.release_stream();
        self.state = ScanState::Ready;
    }

    /// Final teardown, e.g. when the scanning surface goes away.
    pub fn shutdown(&mut self) {
        self.release_stream();
        self.state = ScanState::Stopped;
    }

    fn release_stream(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("Camera released");
        }
    }
}
