/// Convenience result type used across lumen.
pub type LumenResult<T> = Result<T, LumenError>;

/// Top-level error taxonomy used by pipeline, effector and codec APIs.
#[derive(thiserror::Error, Debug)]
pub enum LumenError {
    /// Invalid effector or kernel construction parameters.
    #[error("config error: {0}")]
    Config(String),

    /// Two adjacent effectors disagree on the data type flowing between them.
    #[error("chain error at position {position}: {message}")]
    Chain { position: usize, message: String },

    /// No image loaded, or the pixel buffer could not be assembled.
    #[error("image error: {0}")]
    Image(String),

    /// File missing, unreadable or unwritable.
    #[error("io error: {0}")]
    Io(String),

    /// Encoded data could not be decoded or encoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// The file extension (or format hint) is not one lumen can read or write.
    #[error("unsupported image format '{extension}' (supported: {supported})")]
    UnsupportedFormat { extension: String, supported: String },

    /// An effector failed while the chain was executing.
    #[error("stage {position} ({name}) failed: {source}")]
    Stage {
        position: usize,
        name: String,
        #[source]
        source: Box<LumenError>,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumenError {
    /// Build a [`LumenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`LumenError::Chain`] value.
    pub fn chain(position: usize, msg: impl Into<String>) -> Self {
        Self::Chain {
            position,
            message: msg.into(),
        }
    }

    /// Build a [`LumenError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`LumenError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`LumenError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`LumenError::Stage`] value wrapping the stage's own failure.
    pub fn stage(position: usize, name: impl Into<String>, source: LumenError) -> Self {
        Self::Stage {
            position,
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Chain index the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Chain { position, .. } | Self::Stage { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// A short hint on how to repair the failing call.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("Check the effector parameters against their documented ranges"),
            Self::Chain { .. } => Some("Are you missing an intermediate effector?"),
            Self::Image(_) => Some("Did you call Pipeline::load_image() or Pipeline::unload_image()?"),
            Self::Io(_) => Some("Does the path exist, and is it reachable?"),
            Self::Codec(_) => Some("The file may be corrupt or not match its extension"),
            Self::UnsupportedFormat { .. } => Some("Convert the image to a supported format first"),
            Self::Stage { source, .. } => source.suggestion(),
            Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
