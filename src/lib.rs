//! video-sync - client-side state for a vehicle's video stream manager
//!
//! Mirrors the camera manager's devices and streams, relays create and
//! delete requests, and reports failures as notifications. This library
//! exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod state;
pub mod traits;
pub mod updater;
