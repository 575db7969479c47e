//! Stream status and stream creation payloads.

use serde::{Deserialize, Serialize};

use super::device::{FrameInterval, VideoEncodeType};

/// Capture parameters of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfiguration {
    pub encode: VideoEncodeType,
    pub height: u32,
    pub width: u32,
    pub frame_interval: FrameInterval,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedConfiguration {
    #[serde(default)]
    pub thermal: bool,
}

/// Where a stream is published and how it is captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInformation {
    pub endpoints: Vec<String>,
    pub configuration: CaptureConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_configuration: Option<ExtendedConfiguration>,
}

/// The configuration a running stream was created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAndStream {
    /// Unique among active streams; this is the stream's identity.
    pub name: String,
    pub stream_information: StreamInformation,
    /// Source description as reported by the service, kept opaque
    #[serde(default)]
    pub video_source: serde_json::Value,
}

/// A stream currently known to the video manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub video_and_stream: VideoAndStream,
}

impl StreamStatus {
    pub fn name(&self) -> &str {
        &self.video_and_stream.name
    }
}

/// Body of `POST /streams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStream {
    pub name: String,
    /// Identifier of the device to stream from
    pub source: String,
    pub stream_information: StreamInformation,
}

impl CreatedStream {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        stream_information: StreamInformation,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            stream_information,
        }
    }
}
