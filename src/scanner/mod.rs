//! QR scanning: camera lifecycle around an injected decoder backend.

pub mod backend;
pub mod device;
pub mod session;

pub use backend::{
    CameraBackend, DecodeStream, DeviceError, Frame, PreviewTransform, ScanOptions,
};
pub use device::{CameraDevice, Facing, classify_facing, select_default_camera};
pub use session::{CameraSession, ScanState};
