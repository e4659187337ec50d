use std::time::Duration;

use url::Url;

use super::RetryPolicy;

pub const DEFAULT_KIBANA_VERSION: &str = "7.14.2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Basic auth is only sent when both parts are present.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    pub base_url: Url,
    pub dry_run: bool,
    pub timeout: Duration,
    pub kibana_version: String,
    pub credentials: Option<Credentials>,
    pub retry: RetryPolicy,
}

impl ExecutorOptions {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            dry_run: false,
            timeout: DEFAULT_TIMEOUT,
            kibana_version: DEFAULT_KIBANA_VERSION.to_string(),
            credentials: None,
            retry: RetryPolicy::default(),
        }
    }
}
