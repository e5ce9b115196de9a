/// Why a frame loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source returned an empty frame. Also covers sources that never opened.
    EndOfStream,
    UserQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub stop: StopReason,
}

impl RunSummary {
    /// Successful runs always exit with 0, including a source that produced nothing.
    pub fn exit_code(&self) -> i32 {
        0
    }
}
