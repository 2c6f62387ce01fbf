use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while asking the model collaborator for a reply.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),
}

/// The consumed capability of the model collaborator: given text, return
/// generated text. Implementations own their generation parameters; callers
/// only see the final decoded reply.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, input: &str) -> Result<String, ResponderError>;
}

/// The bot side of a turn.
///
/// A responder failure is recorded here instead of being propagated, so the
/// rendering layer decides how to present it without conflating it with a
/// normal reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReply {
    /// A decoded reply from the model.
    Text(String),

    /// The responder failed; carries the error description.
    Failure(String),
}
