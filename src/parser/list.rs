//! The `.list` request format.
//!
//! ```text
//! # comments and blank lines are ignored
//! PUT /my-index
//! {"settings": {"number_of_shards": 1}}
//! ---
//! DELETE /old-index
//! ```
//!
//! Each document starts with `<METHOD> <PATH>`; the remaining lines form the
//! body. Documents are separated by `---`. Only space characters are trimmed,
//! tabs are kept.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseError, RequestDescriptor};

const DOCUMENT_SEPARATOR: &str = "---\n";

static REQUEST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s+(\S+)").expect("valid regex"));

pub fn parse_list(contents: &str, path: &Path) -> Result<Vec<RequestDescriptor>, ParseError> {
    let cleaned = strip_blank_lines_and_comments(contents);
    cleaned
        .split(DOCUMENT_SEPARATOR)
        .map(|document| parse_document(document.trim_matches(' '), path))
        .collect()
}

fn strip_blank_lines_and_comments(contents: &str) -> String {
    let mut cleaned = String::with_capacity(contents.len());
    for line in contents.split('\n') {
        let line = line.trim_start_matches(' ');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    cleaned
}

fn parse_document(document: &str, path: &Path) -> Result<RequestDescriptor, ParseError> {
    let (request_line, rest) = match document.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (document, ""),
    };

    let captures =
        REQUEST_LINE
            .captures(request_line)
            .ok_or_else(|| ParseError::InvalidRequestLine {
                path: path.to_path_buf(),
                line: request_line.to_string(),
            })?;

    // every kept line was re-terminated, so the last terminator is not body
    let body = rest.strip_suffix('\n').unwrap_or(rest).trim_matches(' ');

    Ok(RequestDescriptor::new(&captures[1], &captures[2], body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(contents: &str) -> Result<Vec<RequestDescriptor>, ParseError> {
        parse_list(contents, Path::new("requests.list"))
    }

    #[test]
    fn blank_line_between_request_line_and_body_is_dropped() {
        let requests = parse("GET /foo\n\nbar baz\n").unwrap();
        assert_eq!(requests, vec![RequestDescriptor::new("GET", "/foo", "bar baz")]);
    }

    #[test]
    fn documents_keep_their_order() {
        let requests = parse("PUT /a\n{\"x\":1}\n---\nDELETE /b\n").unwrap();
        assert_eq!(
            requests,
            vec![
                RequestDescriptor::new("PUT", "/a", "{\"x\":1}"),
                RequestDescriptor::new("DELETE", "/b", ""),
            ]
        );
    }

    #[test]
    fn comments_and_indentation_are_removed() {
        let contents = "# create the index\n  POST /idx/_doc\n   # inline comment\n  {\"a\": 1}\n";
        let requests = parse(contents).unwrap();
        assert_eq!(
            requests,
            vec![RequestDescriptor::new("POST", "/idx/_doc", "{\"a\": 1}")]
        );
    }

    #[test]
    fn multi_line_body_keeps_inner_newlines() {
        let requests = parse("POST /_bulk\n{\"index\":{}}\n{\"field\":1}\n").unwrap();
        assert_eq!(requests[0].body, "{\"index\":{}}\n{\"field\":1}");
    }

    #[test]
    fn only_spaces_are_trimmed_from_body() {
        let requests = parse("POST /x\n\tpayload\t   \n").unwrap();
        assert_eq!(requests[0].body, "\tpayload\t");
    }

    #[test]
    fn method_case_is_preserved() {
        let requests = parse("get /lower\n").unwrap();
        assert_eq!(requests[0].method, "get");
    }

    #[test]
    fn comment_only_segment_is_invalid() {
        let err = parse("GET /a\n---\n# nothing here\n\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { ref line, .. } if line.is_empty()));
    }

    #[test]
    fn empty_file_is_invalid() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));
    }

    #[test]
    fn request_line_without_path_is_invalid() {
        let err = parse("GET\nbody\n").unwrap_err();
        match err {
            ParseError::InvalidRequestLine { line, path } => {
                assert_eq!(line, "GET");
                assert_eq!(path, Path::new("requests.list"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_bad_document_fails_the_whole_file() {
        assert!(parse("GET /ok\n---\n/missing-method\n").is_err());
    }
}
