use thiserror::Error;

/// Errors that stop the server from binding or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
