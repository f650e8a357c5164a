use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be understood (non-2xx status, bad JSON, or
    /// an envelope with neither result nor error).
    #[error("API error: {0}")]
    Api(String),

    /// The server answered with a JSON-RPC error object. The `data` member
    /// usually carries the human-readable detail ("Login name or password
    /// is incorrect.").
    #[error("zabbix error {code}: {message}{}", .data.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
