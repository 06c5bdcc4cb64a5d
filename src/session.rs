// Upload session state machine
//
// Owns everything the UI reflects about one upload/analyze interaction:
// the selected file, the chat-style conversation log, and the simulated
// progress estimate. All mutation happens through the methods below, driven
// by discrete events (key press, timer tick, completion event), so there is
// no concurrent access to worry about.

use crate::client::AnalysisResult;
use std::path::PathBuf;

/// Seeded as the first bot message of every session
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Audio Analysis System! Please upload an audio file for analysis.";

/// Shown when submit is pressed with no file selected
pub const NO_FILE_MESSAGE: &str = "Please select a file first";

/// Shown when an upload begins
pub const PROCESSING_MESSAGE: &str = "Processing your file...";

/// First of the three success messages
pub const COMPLETED_MESSAGE: &str = "Analysis completed successfully!";

/// Single collapsed failure category: transport error, non-2xx, bad body
pub const ERROR_MESSAGE: &str =
    "An error occurred while processing the file. Please try again.";

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the append-only conversation log
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

/// The file currently staged for upload
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Client-side state for one upload/analyze interaction
///
/// Progress is a pure client-side illusion: the service exposes no progress
/// channel, so we estimate a total from file size (~10 seconds per MB) and
/// cap the derived percentage at 95 until the response actually arrives.
pub struct UploadSession {
    pub selected_file: Option<SelectedFile>,
    pub conversation: Vec<ChatMessage>,
    pub is_uploading: bool,
    pub elapsed_seconds: u64,
    pub estimated_total_seconds: u64,
    pub progress_percent: u8,
    /// Incremented per upload; completion events carrying an older value are
    /// stale (the upload they belong to was superseded or torn down) and
    /// must not mutate this session.
    generation: u64,
}

impl UploadSession {
    pub fn new() -> Self {
        Self {
            selected_file: None,
            conversation: vec![ChatMessage {
                text: WELCOME_MESSAGE.to_string(),
                sender: Sender::Bot,
            }],
            is_uploading: false,
            elapsed_seconds: 0,
            estimated_total_seconds: 10,
            progress_percent: 0,
            generation: 0,
        }
    }

    fn push(&mut self, text: impl Into<String>, sender: Sender) {
        self.conversation.push(ChatMessage {
            text: text.into(),
            sender,
        });
    }

    /// Stage a file for upload and derive the processing-time estimate
    /// (10 seconds per MB, floor of 10 seconds - a heuristic, not measured)
    pub fn select_file(&mut self, name: String, size_bytes: u64, path: PathBuf) {
        let file = SelectedFile {
            name,
            size_bytes,
            path,
        };
        self.estimated_total_seconds = (file.size_mb() * 10.0).round().max(10.0) as u64;
        self.push(format!("Selected file: {}", file.name), Sender::User);
        self.selected_file = Some(file);
    }

    /// Try to start an upload
    ///
    /// Returns the generation id the caller must hand back on completion,
    /// or None if the preconditions fail. A missing file gets a bot message;
    /// an already-running upload is silently ignored because the submit
    /// affordance is disabled while uploading.
    pub fn begin_upload(&mut self) -> Option<u64> {
        if self.is_uploading {
            return None;
        }
        if self.selected_file.is_none() {
            self.push(NO_FILE_MESSAGE, Sender::Bot);
            return None;
        }

        self.is_uploading = true;
        self.elapsed_seconds = 0;
        self.progress_percent = 0;
        self.generation += 1;
        self.push(PROCESSING_MESSAGE, Sender::Bot);
        Some(self.generation)
    }

    /// One second of simulated progress; no-op outside an upload
    pub fn tick(&mut self) {
        if !self.is_uploading {
            return;
        }
        self.elapsed_seconds += 1;
        let percent =
            (self.elapsed_seconds as f64 / self.estimated_total_seconds as f64 * 100.0).round();
        self.progress_percent = percent.min(95.0) as u8;
    }

    /// Whether a completion event for `generation` is still current
    fn accepts(&self, generation: u64) -> bool {
        self.is_uploading && generation == self.generation
    }

    /// Apply a successful analysis response
    ///
    /// Clears the selected file so a new one can be chosen; the three result
    /// messages land in the order the user expects to read them.
    pub fn complete_success(&mut self, generation: u64, result: &AnalysisResult) {
        if !self.accepts(generation) {
            tracing::debug!(generation, "Dropping stale analysis success");
            return;
        }
        self.progress_percent = 100;
        self.push(COMPLETED_MESSAGE, Sender::Bot);
        self.push(format!("Transcript: {}", result.transcript), Sender::Bot);
        self.push(
            format!("Estimated number of speakers: {}", result.num_speakers),
            Sender::Bot,
        );
        self.selected_file = None;
        self.is_uploading = false;
    }

    /// Apply an analysis failure
    ///
    /// The file stays selected so the user can retry with the same file.
    pub fn complete_failure(&mut self, generation: u64) {
        if !self.accepts(generation) {
            tracing::debug!(generation, "Dropping stale analysis failure");
            return;
        }
        self.push(ERROR_MESSAGE, Sender::Bot);
        self.is_uploading = false;
    }
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(n: f64) -> u64 {
        (n * 1024.0 * 1024.0) as u64
    }

    fn result(transcript: &str, num_speakers: u32) -> AnalysisResult {
        AnalysisResult {
            transcript: transcript.to_string(),
            num_speakers,
            duration: None,
        }
    }

    #[test]
    fn estimate_scales_with_file_size() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(2.5), "a.mp3".into());
        assert_eq!(session.estimated_total_seconds, 25);
    }

    #[test]
    fn estimate_has_ten_second_floor() {
        let mut session = UploadSession::new();
        session.select_file("tiny.wav".into(), mb(0.3), "tiny.wav".into());
        assert_eq!(session.estimated_total_seconds, 10);
    }

    #[test]
    fn submit_without_file_appends_one_message_and_no_upload() {
        let mut session = UploadSession::new();
        let before = session.conversation.len();

        assert!(session.begin_upload().is_none());
        assert!(!session.is_uploading);
        assert_eq!(session.conversation.len(), before + 1);
        assert_eq!(session.conversation.last().unwrap().text, NO_FILE_MESSAGE);
    }

    #[test]
    fn submit_while_uploading_is_ignored() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(1.0), "a.mp3".into());
        let first = session.begin_upload();
        assert!(first.is_some());

        let before = session.conversation.len();
        assert!(session.begin_upload().is_none());
        assert_eq!(session.conversation.len(), before);
    }

    #[test]
    fn progress_is_monotone_and_capped_at_95() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(1.0), "a.mp3".into());
        let generation = session.begin_upload().unwrap();

        let mut last = 0u8;
        // Tick far beyond the 10 second estimate
        for _ in 0..60 {
            session.tick();
            assert!(session.progress_percent >= last);
            assert!(session.progress_percent <= 95);
            last = session.progress_percent;
        }
        assert_eq!(session.progress_percent, 95);

        session.complete_success(generation, &result("hi", 1));
        assert_eq!(session.progress_percent, 100);
    }

    #[test]
    fn success_clears_file_failure_keeps_it() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(1.0), "a.mp3".into());
        let generation = session.begin_upload().unwrap();
        session.complete_failure(generation);
        assert!(session.selected_file.is_some());
        assert!(!session.is_uploading);

        // Retry with the same file succeeds
        let generation = session.begin_upload().unwrap();
        session.complete_success(generation, &result("ok", 2));
        assert!(session.selected_file.is_none());
        assert!(!session.is_uploading);
    }

    #[test]
    fn tick_outside_upload_mutates_nothing() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(1.0), "a.mp3".into());
        session.tick();
        assert_eq!(session.elapsed_seconds, 0);
        assert_eq!(session.progress_percent, 0);
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut session = UploadSession::new();
        session.select_file("a.mp3".into(), mb(1.0), "a.mp3".into());
        let stale = session.begin_upload().unwrap();
        session.complete_failure(stale);

        // New upload in flight; the old generation must not touch it
        let current = session.begin_upload().unwrap();
        let before = session.conversation.len();
        session.complete_success(stale, &result("late", 9));
        assert_eq!(session.conversation.len(), before);
        assert!(session.is_uploading);

        session.complete_failure(current);
        assert!(!session.is_uploading);
    }

    #[test]
    fn full_scenario_message_order() {
        let mut session = UploadSession::new();
        session.select_file("x.mp3".into(), mb(1.0), "x.mp3".into());
        let generation = session.begin_upload().unwrap();
        session.tick();
        session.complete_success(generation, &result("hello world", 2));

        let texts: Vec<&str> = session
            .conversation
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                WELCOME_MESSAGE,
                "Selected file: x.mp3",
                PROCESSING_MESSAGE,
                COMPLETED_MESSAGE,
                "Transcript: hello world",
                "Estimated number of speakers: 2",
            ]
        );
        assert!(session.selected_file.is_none());
        assert_eq!(session.conversation[1].sender, Sender::User);
        assert_eq!(session.conversation[2].sender, Sender::Bot);
    }
}
