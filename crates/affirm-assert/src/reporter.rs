use std::fmt::Write as _;

use affirm_core::{AffirmError, FailureSummary, Outcome, Record};
use tracing::{debug, warn};

use crate::policies::Policy;

/// Turns a terminal record into the caller-facing result.
///
/// Passed and pending records are a no-op. A failed record is summarised by a
/// depth-first walk and surfaced in the error family of its failure.
pub fn report(record: &Record) -> Result<(), AffirmError> {
    let Outcome::Failed(failure) = record.outcome() else {
        return Ok(());
    };
    let summary = FailureSummary::from_record(record);
    debug!(
        description = %summary.description,
        kind = %failure.kind,
        assertions = summary.assertion_count,
        passed = summary.pass_count,
        failed = summary.failure_count,
        "surfacing root failure"
    );
    Err(AffirmError::from_summary(failure.kind, summary))
}

/// Channel that receives failure summaries, e.g. the host test framework.
pub trait ReportSink {
    /// Publishes one failure summary together with its rendered text.
    fn publish(&self, summary: &FailureSummary, rendered: &str);
}

/// Sink that logs every summary at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn publish(&self, summary: &FailureSummary, rendered: &str) {
        warn!(
            description = %summary.description,
            assertions = summary.assertion_count,
            failed = summary.failure_count,
            "{rendered}"
        );
    }
}

/// Renders summaries and record trees under a [`Policy`] and forwards
/// failures to a [`ReportSink`].
#[derive(Debug, Clone, Default)]
pub struct Reporter<S = TracingSink> {
    policy: Policy,
    sink: S,
}

impl Reporter<TracingSink> {
    /// Creates a reporter logging through `tracing`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            sink: TracingSink,
        }
    }
}

impl<S: ReportSink> Reporter<S> {
    /// Creates a reporter publishing to `sink`.
    pub fn with_sink(policy: Policy, sink: S) -> Self {
        Self { policy, sink }
    }

    /// Active rendering policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The sink failures are handed to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Renders a summary as a header line followed by one line per failure.
    pub fn render(&self, summary: &FailureSummary) -> String {
        let pad = " ".repeat(self.policy.indent);
        let mut out = format!(
            "{}: {} assertions, {} passed, {} failed",
            summary.description, summary.assertion_count, summary.pass_count, summary.failure_count
        );
        let listed = summary.failures.len().min(self.policy.max_listed_failures);
        for detail in &summary.failures[..listed] {
            let _ = write!(out, "\n{pad}- {} ({})", detail.message, detail.code);
            if self.policy.show_context {
                for (key, value) in &detail.context {
                    let _ = write!(out, "\n{pad}{pad}{key}: {value}");
                }
            }
            if let Some(hint) = &detail.hint {
                let _ = write!(out, "\n{pad}{pad}hint: {hint}");
            }
        }
        let elided = summary.failures.len() - listed;
        if elided > 0 {
            let _ = write!(out, "\n{pad}... and {elided} more");
        }
        out
    }

    /// Renders a record tree, one node per line, indented by depth.
    pub fn render_tree(&self, record: &Record) -> String {
        let mut out = String::new();
        self.render_node(record, 0, &mut out);
        out
    }

    fn render_node(&self, record: &Record, depth: usize, out: &mut String) {
        let marker = match record.outcome() {
            Outcome::Pending => "pending",
            Outcome::Passed if !self.policy.show_passed => return,
            Outcome::Passed => "pass",
            Outcome::Failed(_) => "FAIL",
        };
        if !out.is_empty() {
            out.push('\n');
        }
        let pad = " ".repeat(self.policy.indent * depth);
        let _ = write!(out, "{pad}[{marker}] {}", record.description());
        if let Some(failure) = record.outcome().failure() {
            let _ = write!(out, ": {}", failure.detail.message);
        }
        for child in record.children() {
            self.render_node(child, depth + 1, out);
        }
    }

    /// Hands the failure carried by `result`, if any, to the sink and passes the
    /// result through unchanged.
    pub fn conclude<T>(&self, result: Result<T, AffirmError>) -> Result<T, AffirmError> {
        if let Err(error) = &result {
            if let Some(summary) = error.summary() {
                self.sink.publish(summary, &self.render(summary));
            }
        }
        result
    }
}
