use std::{num::NonZeroUsize, path::Path, sync::Arc};

use futures_util::{stream, StreamExt};

use crate::{
    errors::{combine, MultiError},
    executor::RequestExecutor,
    observer::RunObserver,
    parser::{parse_request_file, RequestDescriptor},
};

use super::BulkError;

pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOptions {
    /// Upper bound on in-flight requests; values below 1 behave as 1.
    pub concurrency: usize,
    /// Execute one request at a time, in submission order.
    pub serial: bool,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            serial: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub requests: usize,
}

pub struct BulkRunner<E> {
    executor: E,
    options: BulkOptions,
    observer: Arc<dyn RunObserver>,
}

impl<E: RequestExecutor> BulkRunner<E> {
    pub fn new(executor: E, options: BulkOptions, observer: Arc<dyn RunObserver>) -> Self {
        Self {
            executor,
            options,
            observer,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Parse every file and execute every parsed request.
    ///
    /// Returns only after all work finished. Failures are reported in
    /// submission order (file order, then position in the file), whatever
    /// order they completed in.
    pub async fn run<P: AsRef<Path>>(
        &self,
        files: &[P],
    ) -> Result<RunSummary, MultiError<BulkError>> {
        let mut failures: Vec<(usize, BulkError)> = Vec::new();
        let mut submissions: Vec<(usize, RequestDescriptor)> = Vec::new();
        let mut sequence = 0usize;

        for file in files {
            let path = file.as_ref();
            match parse_request_file(path) {
                Ok(batch) => {
                    self.observer.batch_parsed(&batch);
                    for request in batch.requests {
                        submissions.push((sequence, request));
                        sequence += 1;
                    }
                }
                Err(error) => {
                    self.observer.parse_failed(path, &error);
                    failures.push((sequence, error.into()));
                    sequence += 1;
                }
            }
        }

        let requests = submissions.len();

        if self.options.serial {
            for (index, request) in submissions {
                if let Err(error) = self.execute_one(&request).await {
                    failures.push((index, error));
                }
            }
        } else {
            let limit = self.options.concurrency.max(1);
            let mut completions = stream::iter(submissions)
                .map(|(index, request)| async move { (index, self.execute_one(&request).await) })
                .buffer_unordered(limit);

            while let Some((index, outcome)) = completions.next().await {
                if let Err(error) = outcome {
                    failures.push((index, error));
                }
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        combine(failures.into_iter().map(|(_, error)| error))?;

        Ok(RunSummary {
            files: files.len(),
            requests,
        })
    }

    async fn execute_one(&self, request: &RequestDescriptor) -> Result<(), BulkError> {
        let outcome = self.executor.execute(request).await;
        self.observer.request_completed(request, &outcome);
        outcome
            .map(drop)
            .map_err(|source| BulkError::Execution {
                method: request.method.clone(),
                path: request.path.clone(),
                source,
            })
    }
}
