use log::{debug, warn};
use opencv::core::Mat;
use opencv::highgui;

use crate::error::Result;

/// How long each cycle waits for a key. Also paces file playback.
pub const POLL_DELAY_MS: i32 = 30;

const ESCAPE: i32 = 27;

/// Sink for rendered frames that also reports the key pressed meanwhile.
pub trait FrameSink {
    /// Shows `frame` and returns the polled key code, if any.
    fn present(&mut self, frame: &Mat) -> Result<Option<i32>>;
}

pub fn is_quit_key(key: i32) -> bool {
    key == 'q' as i32 || key == ESCAPE
}

/// A highgui preview window, destroyed on drop.
pub struct HighGuiWindow {
    name: String,
    delay_ms: i32,
}

impl HighGuiWindow {
    pub fn new(name: &str) -> Result<HighGuiWindow> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(HighGuiWindow {
            name: name.to_string(),
            delay_ms: POLL_DELAY_MS,
        })
    }
}

impl FrameSink for HighGuiWindow {
    fn present(&mut self, frame: &Mat) -> Result<Option<i32>> {
        highgui::imshow(&self.name, frame)?;
        let key = highgui::wait_key(self.delay_ms)?;
        Ok((key >= 0).then_some(key))
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        match highgui::destroy_window(&self.name) {
            Ok(()) => debug!("closed window {:?}", self.name),
            Err(error) => warn!("could not close window {:?}: {error}", self.name),
        }
    }
}
