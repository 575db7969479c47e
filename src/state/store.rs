//! The video store: shared state plus the actions that talk to the
//! video manager.
//!
//! Actions never return an error. A failed remote call is reported to the
//! injected [`NotificationSink`] and the action resolves to `false` (or
//! `()` for deletes). Create and delete do not touch the local stream list;
//! they raise the stream "updating" flag and leave it to the next refresh
//! to bring the list, and the flag, back in line with the service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::config::SyncConfig;
use crate::error::{RemoteCallError, SyncResult};
use crate::models::{CreatedStream, Device, StreamStatus};
use crate::notifications::{failure_notification, FailedAction};
use crate::traits::{Headers, HttpClient, HttpError, NotificationSink, Response};

use super::video::VideoState;

/// State container for video streams and devices.
///
/// Share it as `Arc<VideoStore>`. Reads return snapshots; every mutation
/// goes through the methods below and is published to subscribers.
pub struct VideoStore {
    api_url: String,
    request_timeout: Duration,
    http: Arc<dyn HttpClient>,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<VideoState>,
}

impl VideoStore {
    pub fn new(
        config: &SyncConfig,
        http: Arc<dyn HttpClient>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (state, _) = watch::channel(VideoState::new());
        Self {
            api_url: config.api_url(),
            request_timeout: config.request_timeout,
            http,
            notifier,
            state,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<VideoState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> VideoState {
        self.state.borrow().clone()
    }

    pub fn streams(&self) -> Vec<StreamStatus> {
        self.state.borrow().streams().to_vec()
    }

    pub fn devices(&self) -> Vec<Device> {
        self.state.borrow().devices().to_vec()
    }

    pub fn is_updating_streams(&self) -> bool {
        self.state.borrow().is_updating_streams()
    }

    pub fn is_updating_devices(&self) -> bool {
        self.state.borrow().is_updating_devices()
    }

    pub fn find_stream(&self, name: &str) -> Option<StreamStatus> {
        self.state.borrow().find_stream(name).cloned()
    }

    pub fn find_device(&self, source: &str) -> Option<Device> {
        self.state.borrow().find_device(source).cloned()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn set_streams_refreshing(&self, updating: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.is_updating_streams() != updating;
            state.set_streams_refreshing(updating);
            changed
        });
    }

    pub fn set_devices_refreshing(&self, updating: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.is_updating_devices() != updating;
            state.set_devices_refreshing(updating);
            changed
        });
    }

    pub fn replace_streams(&self, streams: Vec<StreamStatus>) {
        self.state.send_modify(|state| state.replace_streams(streams));
    }

    pub fn replace_devices(&self, devices: Vec<Device>) {
        self.state.send_modify(|state| state.replace_devices(devices));
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Ask the service to delete `stream`, identified by its configuration
    /// name.
    ///
    /// The stream flag is raised before the request and stays raised even
    /// when the request fails; only a later stream list replacement clears
    /// it.
    pub async fn delete_stream(&self, stream: &StreamStatus) {
        self.set_streams_refreshing(true);

        let url = format!(
            "{}/delete_stream?name={}",
            self.api_url,
            urlencoding::encode(stream.name())
        );
        tracing::debug!("Deleting video stream '{}'", stream.name());

        let headers = Headers::new();
        match self.call("delete_stream", self.http.delete(&url, &headers)).await {
            Ok(_) => tracing::debug!("Video stream '{}' deleted", stream.name()),
            Err(err) => self.report(FailedAction::DeleteStream, &err),
        }
    }

    /// Ask the service to create a stream. Resolves `true` on a 2xx answer.
    ///
    /// The stream flag is raised before the request and is left raised in
    /// both outcomes.
    pub async fn create_stream(&self, stream: &CreatedStream) -> bool {
        self.set_streams_refreshing(true);

        let body = match serde_json::to_string(stream) {
            Ok(body) => body,
            Err(e) => {
                let err = RemoteCallError::new(
                    "create_stream",
                    HttpError::Other(format!("could not encode stream: {}", e)),
                );
                self.report(FailedAction::CreateStream, &err);
                return false;
            }
        };

        let url = format!("{}/streams", self.api_url);
        tracing::debug!("Creating video stream '{}' from {}", stream.name, stream.source);

        let headers = json_headers();
        match self.call("create_stream", self.http.post(&url, &body, &headers)).await {
            Ok(_) => {
                tracing::debug!("Video stream '{}' created", stream.name);
                true
            }
            Err(err) => {
                self.report(FailedAction::CreateStream, &err);
                false
            }
        }
    }

    /// Fetch the stream list and replace the local one with it.
    ///
    /// Does not raise the stream flag; success clears it.
    pub async fn fetch_streams(&self) -> bool {
        let url = format!("{}/streams", self.api_url);
        match self.fetch_list::<StreamStatus>("fetch_streams", &url).await {
            Ok(streams) => {
                tracing::debug!("Fetched {} video streams", streams.len());
                self.replace_streams(streams);
                true
            }
            Err(err) => {
                self.report(FailedAction::FetchStreams, &err);
                false
            }
        }
    }

    /// Fetch the device list and replace the local one with it.
    ///
    /// Does not raise the device flag; success clears it.
    pub async fn fetch_devices(&self) -> bool {
        let url = format!("{}/v4l", self.api_url);
        match self.fetch_list::<Device>("fetch_devices", &url).await {
            Ok(devices) => {
                tracing::debug!("Fetched {} video devices", devices.len());
                self.replace_devices(devices);
                true
            }
            Err(err) => {
                self.report(FailedAction::FetchDevices, &err);
                false
            }
        }
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> SyncResult<Vec<T>> {
        let response = self.call(operation, self.http.get(url, &Headers::new())).await?;
        response.json::<Vec<T>>().map_err(|e| {
            RemoteCallError::new(operation, HttpError::InvalidResponse(e.to_string()))
        })
    }

    /// Run one remote call under the request timeout; non-2xx is a failure.
    async fn call<F>(&self, operation: &'static str, request: F) -> SyncResult<Response>
    where
        F: Future<Output = Result<Response, HttpError>>,
    {
        let result = match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(HttpError::Timeout(format!(
                "no response after {:?}",
                self.request_timeout
            ))),
        };

        result
            .and_then(Response::error_for_status)
            .map_err(|e| RemoteCallError::new(operation, e))
    }

    fn report(&self, action: FailedAction, err: &RemoteCallError) {
        tracing::warn!(
            operation = err.operation,
            code = action.code(),
            status = ?err.status(),
            timed_out = err.is_timeout(),
            "Video manager call failed: {}",
            err
        );
        self.notifier
            .push_notification(failure_notification(action, err));
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}
