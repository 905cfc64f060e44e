use arch::model::Fault;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid dump config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("{0}")]
    Fault(#[from] Fault),
}
