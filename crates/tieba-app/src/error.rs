use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unrecognised route: {0}")]
    UnknownRoute(String),

    #[error("cannot decode route parameter: {0}")]
    BadParameter(String),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("store error: {0}")]
    Store(#[from] tieba_store::StoreError),

    #[error("thread error: {0}")]
    Thread(#[from] tieba_thread::ThreadError),

    #[error("invalid identifier: {0}")]
    Type(#[from] tieba_types::TypeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
