use std::{path::Path, time::Duration};

use bytes::Bytes;

use crate::{
    executor::ExecutionError,
    parser::{ParseError, RequestBatch, RequestDescriptor},
};

/// Receives the events of a bulk run.
///
/// Passed explicitly to the runner and the executor. Every method has a
/// no-op default so implementations only override what they need.
pub trait RunObserver: Send + Sync {
    fn batch_parsed(&self, _batch: &RequestBatch) {}

    fn parse_failed(&self, _path: &Path, _error: &ParseError) {}

    fn request_sent(&self, _event: &RequestEvent<'_>) {}

    fn retrying(
        &self,
        _request: &RequestDescriptor,
        _attempt: u32,
        _delay: Duration,
        _error: &reqwest::Error,
    ) {
    }

    fn request_completed(
        &self,
        _request: &RequestDescriptor,
        _outcome: &Result<Bytes, ExecutionError>,
    ) {
    }
}

pub struct RequestEvent<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub dry_run: bool,
    pub duration: Duration,
    pub status: Option<u16>,
    pub response_bytes: usize,
}

/// Logs run events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn batch_parsed(&self, batch: &RequestBatch) {
        tracing::info!(
            file = %batch.source.display(),
            requests = batch.len(),
            "parsed request file"
        );
    }

    fn parse_failed(&self, path: &Path, error: &ParseError) {
        tracing::warn!(file = %path.display(), %error, "failed to parse request file");
    }

    fn request_sent(&self, event: &RequestEvent<'_>) {
        tracing::debug!(
            method = event.method,
            url = event.url,
            dry_run = event.dry_run,
            duration = ?event.duration,
            status = ?event.status,
            bytes = event.response_bytes,
            "do request"
        );
    }

    fn retrying(
        &self,
        request: &RequestDescriptor,
        attempt: u32,
        delay: Duration,
        error: &reqwest::Error,
    ) {
        tracing::warn!(
            method = %request.method,
            path = %request.path,
            attempt,
            delay = ?delay,
            %error,
            "request failed, retrying"
        );
    }

    fn request_completed(
        &self,
        request: &RequestDescriptor,
        outcome: &Result<Bytes, ExecutionError>,
    ) {
        match outcome {
            Ok(bytes) => tracing::debug!(
                method = %request.method,
                path = %request.path,
                bytes = bytes.len(),
                "request completed"
            ),
            Err(error) => tracing::warn!(
                method = %request.method,
                path = %request.path,
                %error,
                "request failed"
            ),
        }
    }
}
