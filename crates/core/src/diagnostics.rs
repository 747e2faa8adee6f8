//! Explicit diagnostics channel for the pipeline.
//!
//! The pipeline does no logging of its own. Callers that want to observe a
//! run pass a [`DiagnosticsSink`]; the server forwards events to `tracing`,
//! tests collect them into a `Vec`.

/// Something worth reporting that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The header lacked required columns; no row was evaluated.
    MissingColumns { missing: Vec<String> },
    /// A row failed validation. `row` is zero-based.
    RowRejected {
        row: usize,
        key: String,
        errors: usize,
    },
    /// A unique field value appears in `rows` rows.
    DuplicateValue {
        label: &'static str,
        value: String,
        rows: usize,
    },
    /// Both passes completed.
    Finished {
        rows: usize,
        accepted: usize,
        rejected_keys: usize,
    },
}

/// Receiver for [`PipelineEvent`]s.
pub trait DiagnosticsSink {
    fn record(&mut self, event: PipelineEvent);
}

/// Discards every event.
impl DiagnosticsSink for () {
    fn record(&mut self, _event: PipelineEvent) {}
}

/// Collects every event in order.
impl DiagnosticsSink for Vec<PipelineEvent> {
    fn record(&mut self, event: PipelineEvent) {
        self.push(event);
    }
}
