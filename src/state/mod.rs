//! Video inventory state.
//!
//! - [`VideoState`] - plain value holding both collections and their flags
//! - [`VideoStore`] - shared container applying `VideoState` updates,
//!   publishing them, and running the remote actions

mod store;
mod video;

pub use store::VideoStore;
pub use video::VideoState;
