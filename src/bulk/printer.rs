use colored::Colorize;

use crate::errors::MultiError;

use super::{BulkError, RunSummary};

pub fn print_run_summary(summary: &RunSummary, dry_run: bool) {
    println!("{}", format_run_summary(summary, dry_run));
}

pub fn print_failures(failures: &MultiError<BulkError>) {
    eprintln!(
        "{} {}",
        "Failed:".bold().red(),
        format!("{} error(s)", failures.len()).dimmed()
    );
    for line in failure_lines(failures) {
        eprintln!("  {}", line);
    }
}

fn format_run_summary(summary: &RunSummary, dry_run: bool) -> String {
    let mode = if dry_run {
        "(dry run)".yellow().to_string()
    } else {
        String::new()
    };
    format!(
        "{} {} {} {}",
        "Done:".bold().green(),
        format!("{} request(s)", summary.requests),
        format!("from {} file(s)", summary.files).dimmed(),
        mode
    )
    .trim_end()
    .to_string()
}

fn failure_lines(failures: &MultiError<BulkError>) -> Vec<String> {
    failures
        .iter()
        .map(|failure| match failure {
            BulkError::Parse(error) => format!("{} {}", "parse".yellow(), error),
            BulkError::Execution { .. } => format!("{} {}", "request".red(), failure),
        })
        .collect()
}
