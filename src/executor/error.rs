use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("building HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("building request to {url}: {source}")]
    BuildRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid HTTP method {method:?}")]
    InvalidMethod { method: String },
    #[error("request to {url} failed after {attempts} attempts: {source}")]
    NetworkFailure {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },
    #[error("reading response from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
