use std::path::PathBuf;

/// Exit code reported when a run is rejected before any frame is read.
pub const INVALID_CONFIGURATION_EXIT_CODE: i32 = -1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected before the frame loop starts; nothing was processed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("could not read config at {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfiguration(_) => INVALID_CONFIGURATION_EXIT_CODE,
            _ => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
