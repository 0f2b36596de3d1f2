use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Annotation service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Image could not be annotated (code {code}): {message}")]
    Annotation { code: i32, message: String },
}

impl From<VisionError> for AppError {
    fn from(err: VisionError) -> Self {
        let message = match &err {
            VisionError::Auth(_) => "Could not authenticate with the annotation service",
            VisionError::Transport(_) => "Could not reach the annotation service",
            VisionError::Decode(_) => "Could not understand the annotation service response",
            VisionError::Upstream { .. } => "The annotation service rejected the request",
            VisionError::Annotation { .. } => "The annotation service could not label this image",
        };
        AppError::internal(err, message)
    }
}
