//! Video capture devices as listed by the video manager.
//!
//! Devices are read-only from the client's side: they are fetched from
//! `GET /v4l` and replaced wholesale, never created or deleted here.

use serde::{Deserialize, Serialize};

/// Video encoding advertised by a device format or requested by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoEncodeType {
    H264,
    H265,
    #[serde(rename = "MJPG")]
    Mjpg,
    #[serde(rename = "YUYV")]
    Yuyv,
    /// Any encoding this client does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A frame interval expressed as a fraction of a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInterval {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameInterval {
    /// Frames per second for this interval, or `None` for a zero numerator.
    pub fn fps(&self) -> Option<f64> {
        if self.numerator == 0 {
            None
        } else {
            Some(f64::from(self.denominator) / f64::from(self.numerator))
        }
    }
}

/// One resolution supported by a format, with its frame intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub intervals: Vec<FrameInterval>,
}

/// A capability descriptor: an encoding and the sizes it supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub encode: VideoEncodeType,
    #[serde(default)]
    pub sizes: Vec<Size>,
}

/// A detected video capture source on the onboard computer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Human readable name reported by the driver
    pub name: String,
    /// Identifier assigned by the video manager (e.g. `/dev/video0`)
    pub source: String,
    #[serde(default)]
    pub formats: Vec<Format>,
    /// Driver controls, kept opaque
    #[serde(default)]
    pub controls: Vec<serde_json::Value>,
    /// true when the device is held by something else and cannot stream
    #[serde(default)]
    pub blocked: bool,
}

impl Device {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            formats: Vec::new(),
            controls: Vec::new(),
            blocked: false,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.blocked
    }

    /// Whether any format of this device can produce `encode`.
    pub fn supports(&self, encode: VideoEncodeType) -> bool {
        self.formats.iter().any(|format| format.encode == encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_device_minimal() {
        let json = r#"{"name": "UVC Camera", "source": "/dev/video0"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.name, "UVC Camera");
        assert_eq!(device.source, "/dev/video0");
        assert!(device.formats.is_empty());
        assert!(device.is_available());
    }

    #[test]
    fn test_deserialize_device_with_formats() {
        let json = r#"{
            "name": "UVC Camera",
            "source": "/dev/video2",
            "formats": [
                {
                    "encode": "H264",
                    "sizes": [
                        {"width": 1920, "height": 1080, "intervals": [{"numerator": 1, "denominator": 30}]}
                    ]
                },
                {"encode": "MJPG", "sizes": []}
            ],
            "controls": [{"id": 9963776, "name": "Brightness"}],
            "blocked": true
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.formats.len(), 2);
        assert_eq!(device.formats[0].sizes[0].width, 1920);
        assert_eq!(device.formats[0].sizes[0].intervals[0].fps(), Some(30.0));
        assert!(device.supports(VideoEncodeType::Mjpg));
        assert!(!device.supports(VideoEncodeType::Yuyv));
        assert_eq!(device.controls.len(), 1);
        assert!(!device.is_available());
    }

    #[test]
    fn test_unknown_encoding_does_not_fail() {
        let json = r#"{"encode": "RGB3", "sizes": []}"#;
        let format: Format = serde_json::from_str(json).unwrap();
        assert_eq!(format.encode, VideoEncodeType::Unknown);
    }

    #[test]
    fn test_zero_interval_has_no_fps() {
        let interval = FrameInterval {
            numerator: 0,
            denominator: 30,
        };
        assert_eq!(interval.fps(), None);
    }
}
