//! CLI front end for the video store.
//!
//! `main` parses arguments with [`parse_args`], builds a store with
//! [`build_store`] and hands both to [`run_cli_command`]. Handlers return
//! the text to print so they can be driven against a mock service.

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_string, VERSION};

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;

use crate::adapters::ReqwestHttpClient;
use crate::config::{SyncConfig, DEFAULT_POLL_INTERVAL};
use crate::models::{CreatedStream, Device, StreamStatus};
use crate::notifications::NotificationStore;
use crate::state::{VideoState, VideoStore};
use crate::updater::VideoUpdater;

/// Store wired to the real service, plus the sink it reports to.
pub fn build_store(config: &SyncConfig) -> Result<(Arc<VideoStore>, Arc<NotificationStore>)> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout)
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;
    let notifications = Arc::new(NotificationStore::new());
    let store = VideoStore::new(config, Arc::new(http), notifications.clone());
    Ok((Arc::new(store), notifications))
}

/// Run `command`. `Version` and `Help` need no store and are printed here.
pub async fn run_cli_command(
    command: CliCommand,
    config: &SyncConfig,
    store: Arc<VideoStore>,
    notifications: Arc<NotificationStore>,
) -> Result<()> {
    match command {
        CliCommand::Version => println!("{}", version_string()),
        CliCommand::Help => print!("{}", USAGE),
        CliCommand::List => print!("{}", handle_list(&store, &notifications).await?),
        CliCommand::Delete(name) => {
            print!("{}", handle_delete(&store, &notifications, &name).await?)
        }
        CliCommand::Create(path) => {
            print!("{}", handle_create(&store, &notifications, &path).await?)
        }
        CliCommand::Watch => handle_watch(config, store, notifications).await?,
    }
    Ok(())
}

/// Fetch both lists once and render them.
pub async fn handle_list(store: &Arc<VideoStore>, notifications: &NotificationStore) -> Result<String> {
    let outcome = VideoUpdater::new(store.clone(), DEFAULT_POLL_INTERVAL)
        .tick()
        .await;
    if !outcome.streams_ok || !outcome.devices_ok {
        return Err(failure(notifications));
    }
    Ok(render_state(&store.snapshot()))
}

/// Delete the stream named `name`, then re-fetch the stream list.
pub async fn handle_delete(
    store: &VideoStore,
    notifications: &NotificationStore,
    name: &str,
) -> Result<String> {
    if !store.fetch_streams().await {
        return Err(failure(notifications));
    }
    let stream = match store.find_stream(name) {
        Some(stream) => stream,
        None => bail!("No video stream named '{}'", name),
    };

    let mut reports = notifications.subscribe();
    store.delete_stream(&stream).await;
    if reports.try_recv().is_ok() {
        return Err(failure(notifications));
    }
    tracing::info!("Deleted video stream '{}'", name);

    let mut out = format!("Deleted stream '{}'\n", name);
    out.push_str(&refreshed_streams(store, notifications).await?);
    Ok(out)
}

/// Create a stream from the JSON description in `path`.
pub async fn handle_create(
    store: &VideoStore,
    notifications: &NotificationStore,
    path: &Path,
) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let stream: CreatedStream = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not a valid stream description", path.display()))?;

    if store.fetch_devices().await {
        check_source(store, &stream);
    }
    if !store.create_stream(&stream).await {
        return Err(failure(notifications));
    }
    tracing::info!("Created video stream '{}'", stream.name);

    let mut out = format!("Created stream '{}'\n", stream.name);
    out.push_str(&refreshed_streams(store, notifications).await?);
    Ok(out)
}

/// Warn when `stream` asks for a device or encoding the vehicle does not
/// offer.
fn check_source(store: &VideoStore, stream: &CreatedStream) {
    let encode = stream.stream_information.configuration.encode;
    match store.find_device(&stream.source) {
        None => tracing::warn!("No video device at {}", stream.source),
        Some(device) if !device.is_available() => {
            tracing::warn!("Video device {} is blocked", stream.source)
        }
        Some(device) if !device.supports(encode) => {
            tracing::warn!("Video device {} does not list {:?}", stream.source, encode)
        }
        Some(_) => {}
    }
}

/// Re-fetch and render the stream list after a change. A failed refresh is
/// an error even though the change went through.
async fn refreshed_streams(store: &VideoStore, notifications: &NotificationStore) -> Result<String> {
    if !store.fetch_streams().await {
        return Err(failure(notifications).wrap_err("Stream list could not be refreshed"));
    }
    Ok(render_streams(&store.streams()))
}

/// Refresh until Ctrl-C, printing the state whenever it changes and every
/// notification as it arrives.
pub async fn handle_watch(
    config: &SyncConfig,
    store: Arc<VideoStore>,
    notifications: Arc<NotificationStore>,
) -> Result<()> {
    let mut state_rx = store.subscribe();
    let mut notification_rx = notifications.subscribe();
    let updater = VideoUpdater::new(store.clone(), config.poll_interval).spawn();

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                print!("{}", render_state(&state));
            }
            received = notification_rx.recv() => {
                match received {
                    Ok(notification) => eprintln!("[{}] {}", notification.kind, notification.message),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Missed {} notifications", n);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping video updater");
                break;
            }
        }
    }

    updater.abort();
    Ok(())
}

fn failure(notifications: &NotificationStore) -> color_eyre::eyre::Report {
    let messages: Vec<String> = notifications
        .drain()
        .into_iter()
        .map(|n| n.message)
        .collect();
    if messages.is_empty() {
        eyre!("Video manager call failed")
    } else {
        eyre!(messages.join("\n"))
    }
}

pub fn render_state(state: &VideoState) -> String {
    let mut out = String::new();
    out.push_str(&render_devices(state.devices()));
    out.push_str(&render_streams(state.streams()));
    if state.is_updating_streams() || state.is_updating_devices() {
        out.push_str("(updating...)\n");
    }
    out
}

pub fn render_devices(devices: &[Device]) -> String {
    let mut out = format!("Devices ({}):\n", devices.len());
    for device in devices {
        let encodes: Vec<String> = device
            .formats
            .iter()
            .map(|f| format!("{:?}", f.encode))
            .collect();
        let _ = write!(out, "  {} [{}]", device.name, device.source);
        if !encodes.is_empty() {
            let _ = write!(out, " {}", encodes.join(", "));
        }
        if !device.is_available() {
            out.push_str(" (blocked)");
        }
        out.push('\n');
    }
    out
}

pub fn render_streams(streams: &[StreamStatus]) -> String {
    let mut out = format!("Streams ({}):\n", streams.len());
    for stream in streams {
        let info = &stream.video_and_stream.stream_information;
        let config = &info.configuration;
        let state = if stream.running { "running" } else { "stopped" };
        let _ = write!(
            out,
            "  {} {:?} {}x{}",
            stream.name(),
            config.encode,
            config.width,
            config.height
        );
        if let Some(fps) = config.frame_interval.fps() {
            let _ = write!(out, "@{}fps", fps);
        }
        let _ = write!(out, " {} -> {}", state, info.endpoints.join(", "));
        if let Some(error) = &stream.error {
            let _ = write!(out, " (error: {})", error);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CaptureConfiguration, FrameInterval, StreamInformation, VideoAndStream, VideoEncodeType,
    };

    fn stream(name: &str, running: bool) -> StreamStatus {
        StreamStatus {
            running,
            error: None,
            video_and_stream: VideoAndStream {
                name: name.to_string(),
                stream_information: StreamInformation {
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
                video_source: serde_json::Value::Null,
            },
        }
    }

    #[test]
    fn test_render_streams() {
        let out = render_streams(&[stream("cam0", true), stream("cam1", false)]);
        assert_eq!(
            out,
            "Streams (2):\n  cam0 H264 1920x1080@30fps running -> udp://192.168.2.1:5600\n  cam1 H264 1920x1080@30fps stopped -> udp://192.168.2.1:5600\n"
        );
    }

    #[test]
    fn test_render_devices_marks_blocked() {
        let mut device = Device::new("UVC Camera", "/dev/video0");
        device.blocked = true;
        let out = render_devices(&[device]);
        assert_eq!(out, "Devices (1):\n  UVC Camera [/dev/video0] (blocked)\n");
    }

    #[test]
    fn test_render_state_shows_updating() {
        let mut state = VideoState::new();
        state.set_streams_refreshing(true);
        assert!(render_state(&state).ends_with("(updating...)\n"));
    }
}
