use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("working directory query error: {0}")]
    CurrentDir(String),

    #[error("working directory change error: {0}")]
    ChangeDir(String),
}
