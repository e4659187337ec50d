mod error;
mod http;
mod models;
mod retry;

pub use error::ExecutionError;
pub use http::{HttpExecutor, RequestExecutor};
pub use models::{Credentials, ExecutorOptions, DEFAULT_KIBANA_VERSION, DEFAULT_TIMEOUT};
pub use retry::RetryPolicy;
