//! Camera enumeration results and facing classification.

use serde::{Deserialize, Serialize};

const FRONT_TERMS: &[&str] = &["front", "face", "user", "selfie"];
const BACK_TERMS: &[&str] = &["back", "rear", "environment"];

/// Which way a camera points, as far as the platform lets us tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    Back,
    Unknown,
}

/// A video input device as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
    /// Orientation reported by the platform (`user`, `environment`, ...), if any.
    pub facing_hint: Option<String>,
}

impl CameraDevice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            facing_hint: None,
        }
    }

    pub fn with_facing_hint(mut self, hint: impl Into<String>) -> Self {
        self.facing_hint = Some(hint.into());
        self
    }

    pub fn facing(&self) -> Facing {
        classify_facing(self.facing_hint.as_deref(), &self.label)
    }
}

fn classify_text(text: &str) -> Facing {
    let text = text.to_lowercase();
    if FRONT_TERMS.iter().any(|t| text.contains(t)) {
        Facing::Front
    } else if BACK_TERMS.iter().any(|t| text.contains(t)) {
        Facing::Back
    } else {
        Facing::Unknown
    }
}

/// Best effort: the reported hint wins, the label is the fallback.
pub fn classify_facing(hint: Option<&str>, label: &str) -> Facing {
    match hint.map(classify_text) {
        Some(facing @ (Facing::Front | Facing::Back)) => facing,
        _ => classify_text(label),
    }
}

/// Prefer the first back-facing camera, otherwise the first one listed.
pub fn select_default_camera(devices: &[CameraDevice]) -> Option<usize> {
    if devices.is_empty() {
        return None;
    }
    devices
        .iter()
        .position(|d| d.facing() == Facing::Back)
        .or(Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_takes_precedence_over_label() {
        assert_eq!(classify_facing(Some("environment"), "Front Camera"), Facing::Back);
        assert_eq!(classify_facing(Some("user"), "Rear Camera"), Facing::Front);
    }

    #[test]
    fn label_fallback() {
        assert_eq!(classify_facing(None, "FaceTime HD Camera"), Facing::Front);
        assert_eq!(classify_facing(None, "camera2 0, facing back"), Facing::Back);
        assert_eq!(classify_facing(None, "Selfie cam"), Facing::Front);
        assert_eq!(classify_facing(Some(""), "Rear Wide"), Facing::Back);
        assert_eq!(classify_facing(None, "USB Video Device"), Facing::Unknown);
    }

    #[test]
    fn default_prefers_back_camera() {
        let devices = vec![
            CameraDevice::new("a", "Front Camera"),
            CameraDevice::new("b", "Integrated Webcam"),
            CameraDevice::new("c", "Back Camera"),
        ];
        assert_eq!(select_default_camera(&devices), Some(2));
    }

    #[test]
    fn default_falls_back_to_first() {
        let devices = vec![
            CameraDevice::new("a", "Integrated Webcam"),
            CameraDevice::new("b", "Front Camera"),
        ];
        assert_eq!(select_default_camera(&devices), Some(0));
        assert_eq!(select_default_camera(&[]), None);
    }
}
