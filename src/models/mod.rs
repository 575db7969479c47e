//! Data model shared with the video manager service.

mod device;
mod stream;

pub use device::{Device, Format, FrameInterval, Size, VideoEncodeType};
pub use stream::{
    CaptureConfiguration, CreatedStream, ExtendedConfiguration, StreamInformation, StreamStatus,
    VideoAndStream,
};
