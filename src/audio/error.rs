use std::error::Error;
use std::fmt;

/// Raised while acquiring the input device or wiring the streams. The
/// caller keeps running without a graph; analysis ticks become no-ops.
#[derive(Debug)]
pub enum GraphError {
    NoDefaultDevice,
    DeviceNotFound(String),
    UnsupportedFormat(cpal::SampleFormat),
    Config(cpal::DefaultStreamConfigError),
    BuildStream(cpal::BuildStreamError),
    PlayStream(cpal::PlayStreamError),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NoDefaultDevice => write!(f, "no default input device available"),
            GraphError::DeviceNotFound(id) => {
                write!(f, "no input device with id '{}' was found", id)
            }
            GraphError::UnsupportedFormat(format) => {
                write!(f, "device does not support f32 samples (got {})", format)
            }
            GraphError::Config(e) => write!(f, "could not query stream config: {}", e),
            GraphError::BuildStream(e) => write!(f, "could not build stream: {}", e),
            GraphError::PlayStream(e) => write!(f, "could not start stream: {}", e),
        }
    }
}

impl Error for GraphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GraphError::Config(e) => Some(e),
            GraphError::BuildStream(e) => Some(e),
            GraphError::PlayStream(e) => Some(e),
            _ => None,
        }
    }
}
