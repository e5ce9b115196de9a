mod source;

pub use source::{FrameSource, SourceSpec, VideoSource, is_device_index};
