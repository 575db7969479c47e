//! Common test utilities for integration tests.
//!
//! Fixtures mirror the payloads the camera manager sends and accepts, plus
//! helpers to wire a [`VideoStore`] against a mock server.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use video_sync::config::SyncConfig;
use video_sync::models::{
    CaptureConfiguration, CreatedStream, FrameInterval, StreamInformation, VideoEncodeType,
};
use video_sync::notifications::NotificationStore;
use video_sync::state::VideoStore;
use video_sync::traits::HttpClient;

/// Config pointing at `host` (a wiremock URI) with a short timeout.
pub fn test_config(host: &str) -> SyncConfig {
    SyncConfig::new()
        .with_host(host)
        .with_request_timeout(Duration::from_secs(2))
}

/// Store plus the notification sink it reports to.
pub fn store_with_client(
    config: &SyncConfig,
    http: Arc<dyn HttpClient>,
) -> (Arc<VideoStore>, Arc<NotificationStore>) {
    let notifications = Arc::new(NotificationStore::new());
    let store = VideoStore::new(config, http, notifications.clone());
    (Arc::new(store), notifications)
}

/// A 1080p H264 UDP stream named `name` on `/dev/video0`.
pub fn test_created_stream(name: &str) -> CreatedStream {
    CreatedStream::new(
        name,
        "/dev/video0",
        StreamInformation {
            endpoints: vec!["udp://192.168.2.1:5600".to_string()],
            configuration: CaptureConfiguration {
                encode: VideoEncodeType::H264,
                height: 1080,
                width: 1920,
                frame_interval: FrameInterval {
                    numerator: 1,
                    denominator: 30,
                },
            },
            extended_configuration: None,
        },
    )
}

/// One entry of `GET /streams`.
pub fn stream_status_json(name: &str, running: bool) -> serde_json::Value {
    serde_json::json!({
        "running": running,
        "error": null,
        "video_and_stream": {
            "name": name,
            "stream_information": {
                "endpoints": ["udp://192.168.2.1:5600"],
                "configuration": {
                    "encode": "H264",
                    "height": 1080,
                    "width": 1920,
                    "frame_interval": { "numerator": 1, "denominator": 30 }
                }
            },
            "video_source": {
                "Local": { "name": "UVC Camera", "device_path": "/dev/video0" }
            }
        }
    })
}

/// One entry of `GET /v4l`.
pub fn device_json(name: &str, source: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "source": source,
        "formats": [{
            "encode": "H264",
            "sizes": [{
                "width": 1920,
                "height": 1080,
                "intervals": [{ "numerator": 1, "denominator": 30 }]
            }]
        }],
        "controls": []
    })
}
