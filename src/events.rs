// Events that flow from the upload task back to the TUI
//
// The upload runs as a spawned tokio task; its outcome crosses back to the
// event loop over an mpsc channel. Each event carries the generation id of
// the upload it belongs to, so the session can discard anything stale
// (a completion that raced with teardown or a superseding upload).

use crate::client::AnalysisResult;

/// Outcome of one analyze request
#[derive(Debug)]
pub enum SessionEvent {
    /// The service returned a well-formed success response
    AnalysisComplete {
        generation: u64,
        result: AnalysisResult,
    },

    /// Transport error, non-2xx status, or malformed body
    AnalysisFailed { generation: u64, error: String },
}
