// TUI application state
//
// Owns the upload session, the file picker, and the handle to any in-flight
// upload task. All mutation happens on the event loop; the upload task only
// communicates back through the session event channel.

use crate::client::AnalysisClient;
use crate::events::SessionEvent;
use crate::logging::LogBuffer;
use crate::picker::FilePicker;
use crate::session::UploadSession;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Main application state for the TUI
pub struct App {
    /// Client-side upload/analyze state machine
    pub session: UploadSession,

    /// Audio files available for selection
    pub picker: FilePicker,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether the logs panel is visible
    pub show_logs: bool,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Service base URL, shown in the status bar
    pub service_url: String,

    /// Audio duration reported by the last successful analysis
    pub last_duration: Option<f64>,

    /// Handle to the in-flight upload task, aborted on teardown
    upload_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(picker: FilePicker, log_buffer: LogBuffer, service_url: String) -> Self {
        Self {
            session: UploadSession::new(),
            picker,
            should_quit: false,
            show_logs: false,
            log_buffer,
            start_time: Instant::now(),
            service_url,
            last_duration: None,
            upload_task: None,
        }
    }

    /// Stage the file under the picker cursor
    pub fn select_current_file(&mut self) {
        let Some(file) = self.picker.current().cloned() else {
            return;
        };
        self.session
            .select_file(file.name, file.size_bytes, file.path);
    }

    /// Start uploading the selected file, if the session allows it
    ///
    /// Spawns the request as a background task; the outcome comes back as a
    /// SessionEvent carrying the generation id. Returns true if an upload
    /// actually started (the caller resets the progress timer on that).
    pub fn start_upload(
        &mut self,
        client: &AnalysisClient,
        event_tx: &mpsc::Sender<SessionEvent>,
    ) -> bool {
        let Some(generation) = self.session.begin_upload() else {
            return false;
        };
        // begin_upload only succeeds with a file selected
        let file = self
            .session
            .selected_file
            .clone()
            .expect("upload started without a file");

        let client = client.clone();
        let event_tx = event_tx.clone();
        self.upload_task = Some(tokio::spawn(async move {
            let event = match client.analyze(&file.path, &file.name).await {
                Ok(result) => SessionEvent::AnalysisComplete { generation, result },
                Err(e) => {
                    tracing::warn!("Analysis failed: {:#}", e);
                    SessionEvent::AnalysisFailed {
                        generation,
                        error: format!("{:#}", e),
                    }
                }
            };
            // Receiver gone means the TUI already shut down
            let _ = event_tx.send(event).await;
        }));
        true
    }

    /// Reduce an upload outcome into session state
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::AnalysisComplete { generation, result } => {
                self.last_duration = result.duration;
                self.session.complete_success(generation, &result);
                self.upload_task = None;
            }
            SessionEvent::AnalysisFailed { generation, error } => {
                tracing::debug!(generation, %error, "Applying analysis failure");
                self.session.complete_failure(generation);
                self.upload_task = None;
            }
        }
    }

    /// Refresh the picker's view of the audio directory
    pub fn rescan_files(&mut self) {
        if let Err(e) = self.picker.rescan() {
            tracing::warn!("Rescan failed: {:#}", e);
        }
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }

    /// Abort any in-flight upload so a late response cannot outlive the app
    pub fn teardown(&mut self) {
        if let Some(task) = self.upload_task.take() {
            task.abort();
        }
    }
}
