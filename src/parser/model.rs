use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ParseError;

/// One request read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRequest")]
pub struct RequestDescriptor {
    pub method: String,
    /// Path that replaces the path component of the base URL.
    pub path: String,
    /// Raw payload; empty means no body is sent.
    pub body: String,
}

impl RequestDescriptor {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: body.into(),
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

#[derive(Deserialize)]
struct RawRequest {
    method: String,
    url: String,
    #[serde(default)]
    body: Option<String>,
}

impl From<RawRequest> for RequestDescriptor {
    fn from(value: RawRequest) -> Self {
        Self {
            method: value.method,
            path: value.url,
            body: value.body.unwrap_or_default(),
        }
    }
}

/// Requests parsed from a single file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBatch {
    pub source: PathBuf,
    pub requests: Vec<RequestDescriptor>,
}

impl RequestBatch {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Yaml,
    Json,
    List,
}

impl RequestFormat {
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "list" => Ok(Self::List),
            _ => Err(ParseError::UnknownExtension {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            RequestFormat::from_path(Path::new("a/b.yml")).unwrap(),
            RequestFormat::Yaml
        );
        assert_eq!(
            RequestFormat::from_path(Path::new("b.yaml")).unwrap(),
            RequestFormat::Yaml
        );
        assert_eq!(
            RequestFormat::from_path(Path::new("b.json")).unwrap(),
            RequestFormat::Json
        );
        assert_eq!(
            RequestFormat::from_path(Path::new("b.list")).unwrap(),
            RequestFormat::List
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = RequestFormat::from_path(Path::new("requests.txt")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownExtension { ref extension, .. } if extension == "txt"
        ));

        let err = RequestFormat::from_path(Path::new("requests")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownExtension { ref extension, .. } if extension.is_empty()
        ));
    }
}
