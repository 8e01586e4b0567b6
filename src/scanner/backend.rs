//! Seam between the session state machine and the platform camera/decoder.

use thiserror::Error;

use super::device::CameraDevice;

/// Session-level camera failures. A frame without a code is not one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Access to cameras was refused or revoked.
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("failed to enumerate cameras: {0}")]
    EnumerationFailed(String),

    #[error("failed to start camera: {0}")]
    StartFailed(String),

    /// The capture stream broke while scanning.
    #[error("camera stream failed: {0}")]
    StreamFailed(String),

    #[error("no camera available")]
    NoCamera,

    #[error("unknown camera: {0}")]
    UnknownDevice(String),

    #[error("scanner is not scanning")]
    NotScanning,
}

impl DeviceError {
    /// Permission failures route to a re-consent action instead of a retry.
    pub fn is_permission(&self) -> bool {
        matches!(self, DeviceError::PermissionDenied(_))
    }
}

/// Decode loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Frames sampled per second.
    pub fps: u32,
    /// Side length in pixels of the square detection region.
    pub qr_box: u32,
}

impl ScanOptions {
    pub const MAX_FPS: u32 = 30;

    pub fn new(fps: u32, qr_box: u32) -> Self {
        Self {
            fps: fps.clamp(1, Self::MAX_FPS),
            qr_box: qr_box.max(1),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(10, 250)
    }
}

/// Cosmetic transform applied to the preview surface only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTransform {
    None,
    Mirrored,
}

/// Result of sampling one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Decoded(String),
    /// Nothing recognisable in the frame; normal noise.
    Empty,
}

/// Enumerates cameras and opens decode streams on them.
#[async_trait::async_trait]
pub trait CameraBackend: Send + Sync {
    async fn enumerate(&self) -> Result<Vec<CameraDevice>, DeviceError>;

    /// Ask the user for camera access.
    async fn request_access(&self) -> Result<(), DeviceError>;

    /// Acquire `device` and start sampling frames. The device stays held until
    /// [`DecodeStream::release`] is called.
    async fn open(
        &self,
        device: &CameraDevice,
        options: &ScanOptions,
        preview: PreviewTransform,
    ) -> Result<Box<dyn DecodeStream>, DeviceError>;
}

/// A running decode loop holding a camera.
#[async_trait::async_trait]
pub trait DecodeStream: Send {
    /// Wait for the next sampled frame.
    async fn next_frame(&mut self) -> Result<Frame, DeviceError>;

    /// Stop sampling and free the device. Must be idempotent.
    fn release(&mut self);
}
