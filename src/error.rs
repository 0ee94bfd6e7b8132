use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("please, define entity in the card config")]
    MissingEntity,

    #[error("card received host state before it was configured")]
    NotConfigured,

    #[error("invalid card config: {0}")]
    InvalidConfig(String),

    #[error("forecast subscription failed: {0}")]
    Subscription(String),

    #[error("event listener `{0}` is already registered")]
    DuplicateListener(String),

    #[error("chart renderer failed: {0}")]
    Renderer(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
