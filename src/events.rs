//! Typed pipeline events on an ordered channel.
//!
//! The pipeline runs as a single sequential task, usually off the caller's
//! interactive thread. Instead of UI-framework signals it writes typed events
//! to a `tokio` unbounded channel: the caller attaches a sender via
//! [`crate::config::TranslationConfigBuilder::events`] and drains the
//! receiver however it likes (progress bar, log lines, WebSocket, nothing).
//!
//! Events are emitted in processing order, so a consumer sees progress values
//! rise monotonically and page statuses in page order. A dropped receiver is
//! harmless: sends become no-ops and the pipeline keeps running.

use tokio::sync::mpsc::UnboundedSender;

/// An observational event emitted by the pipeline.
///
/// These are outputs only, never inputs; the pipeline does not wait for the
/// consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Overall progress, scaled to 0–100. Emitted after each page completes.
    Progress(u8),
    /// Human-readable status line describing the current page and action.
    Status(String),
    /// The run finished; carries the fully assembled document text.
    Done(String),
    /// The run failed fatally; carries the error message. No document exists.
    Failed(String),
}

/// Sender half of the event channel stored in the config.
pub type EventSender = UnboundedSender<PipelineEvent>;

/// Send an event if a sender is attached, ignoring a closed channel.
pub(crate) fn emit(events: &Option<EventSender>, event: PipelineEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}
