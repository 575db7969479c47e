//! The last-known video inventory and its refresh flags.
//!
//! `VideoState` is a plain value. Its methods are the only mutations the
//! store ever applies, and none of them touch the network.

use crate::models::{Device, StreamStatus};

/// Streams and devices as last reported by the video manager.
///
/// Each collection carries its own "updating" flag: true while a fetch or
/// mutation affecting it is in flight and the data may be stale. The two
/// collections are independent; nothing here touches both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoState {
    available_streams: Vec<StreamStatus>,
    available_devices: Vec<Device>,
    updating_streams: bool,
    updating_devices: bool,
}

impl VideoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streams(&self) -> &[StreamStatus] {
        &self.available_streams
    }

    pub fn devices(&self) -> &[Device] {
        &self.available_devices
    }

    pub fn is_updating_streams(&self) -> bool {
        self.updating_streams
    }

    pub fn is_updating_devices(&self) -> bool {
        self.updating_devices
    }

    /// First stream whose configuration name is `name`.
    pub fn find_stream(&self, name: &str) -> Option<&StreamStatus> {
        self.available_streams
            .iter()
            .find(|stream| stream.name() == name)
    }

    pub fn find_device(&self, source: &str) -> Option<&Device> {
        self.available_devices
            .iter()
            .find(|device| device.source == source)
    }

    pub fn set_streams_refreshing(&mut self, updating: bool) {
        self.updating_streams = updating;
    }

    pub fn set_devices_refreshing(&mut self, updating: bool) {
        self.updating_devices = updating;
    }

    /// Replace the whole stream list; the stream flag drops to false.
    pub fn replace_streams(&mut self, streams: Vec<StreamStatus>) {
        self.available_streams = streams;
        self.updating_streams = false;
    }

    /// Replace the whole device list; the device flag drops to false.
    pub fn replace_devices(&mut self, devices: Vec<Device>) {
        self.available_devices = devices;
        self.updating_devices = false;
    }
}
