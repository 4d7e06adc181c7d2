use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryDeckError {
    #[error("Query not found: {0}")]
    QueryNotFound(String),

    #[error("Not signed in: no current user")]
    NotAuthenticated,

    #[error("A push is already in progress")]
    PushInProgress,

    #[error("A confirmation is already pending; resolve it first")]
    PopupPending,

    #[error("No confirmation is pending")]
    NoPopup,

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QueryDeckError>;
