use std::{fs, path::Path};

use super::{
    list::parse_list,
    model::{RequestBatch, RequestDescriptor, RequestFormat},
    ParseError,
};

pub fn parse_request_file(path: &Path) -> Result<RequestBatch, ParseError> {
    let format = RequestFormat::from_path(path)?;
    let raw = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_request_contents(&raw, format, path)
}

pub fn parse_request_contents(
    contents: &str,
    format: RequestFormat,
    path: &Path,
) -> Result<RequestBatch, ParseError> {
    let requests: Vec<RequestDescriptor> = match format {
        RequestFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|source| ParseError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        RequestFormat::Json => {
            serde_json::from_str(contents).map_err(|source| ParseError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        RequestFormat::List => parse_list(contents, path)?,
    };

    Ok(RequestBatch {
        source: path.to_path_buf(),
        requests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const YAML: &str = r#"
- method: PUT
  url: /logs-2024
  body: '{"settings":{"number_of_shards":1}}'
- method: DELETE
  url: /logs-2023
"#;

    const JSON: &str = r#"[
  {"method": "PUT", "url": "/logs-2024", "body": "{\"settings\":{\"number_of_shards\":1}}"},
  {"method": "DELETE", "url": "/logs-2023"}
]"#;

    const LIST: &str = r#"# rotate indices
PUT /logs-2024
{"settings":{"number_of_shards":1}}
---
DELETE /logs-2023
"#;

    fn expected() -> Vec<RequestDescriptor> {
        vec![
            RequestDescriptor::new("PUT", "/logs-2024", r#"{"settings":{"number_of_shards":1}}"#),
            RequestDescriptor::new("DELETE", "/logs-2023", ""),
        ]
    }

    #[test]
    fn formats_describing_the_same_requests_are_equivalent() -> Result<()> {
        let yaml = parse_request_contents(YAML, RequestFormat::Yaml, Path::new("r.yaml"))?;
        let json = parse_request_contents(JSON, RequestFormat::Json, Path::new("r.json"))?;
        let list = parse_request_contents(LIST, RequestFormat::List, Path::new("r.list"))?;

        assert_eq!(yaml.requests, expected());
        assert_eq!(json.requests, expected());
        assert_eq!(list.requests, expected());
        Ok(())
    }

    #[test]
    fn null_body_is_treated_as_empty() -> Result<()> {
        let batch = parse_request_contents(
            "- method: GET\n  url: /_cat/indices\n  body:\n",
            RequestFormat::Yaml,
            Path::new("r.yml"),
        )?;
        assert!(!batch.requests[0].has_body());
        Ok(())
    }

    #[test]
    fn missing_method_is_a_parse_error() {
        let err = parse_request_contents(
            r#"[{"url": "/x"}]"#,
            RequestFormat::Json,
            Path::new("r.json"),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Json { .. }));
    }

    #[test]
    fn malformed_yaml_is_reported_with_path() {
        let err = parse_request_contents("method: [", RequestFormat::Yaml, Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Yaml { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn parse_request_file_reads_from_disk() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("batch.list");
        std::fs::write(&path, LIST)?;

        let batch = parse_request_file(&path)?;
        assert_eq!(batch.source, path);
        assert_eq!(batch.len(), 2);
        Ok(())
    }

    #[test]
    fn parse_request_file_checks_extension_before_reading() {
        let err = parse_request_file(Path::new("does-not-exist.csv")).unwrap_err();
        assert!(matches!(err, ParseError::UnknownExtension { .. }));
    }

    #[test]
    fn parse_request_file_reports_missing_file() {
        let err = parse_request_file(Path::new("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
        assert!(err.to_string().contains("reading request file"));
    }
}
