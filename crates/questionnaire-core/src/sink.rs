use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use questionnaire_spec::Submission;
use serde::Serialize;

/// Opaque delivery outcome surfaced to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionAck {
    Submitted,
    Failed { reason: String },
}

impl SubmissionAck {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionAck::Submitted)
    }
}

/// Receives completed questionnaires. Transport, persistence and retry are the
/// sink's concern; the controller calls `submit` exactly once per completion.
///
/// `submit` runs on the caller's thread before `go_next` returns. Sinks backed
/// by slow transports should queue the submission and return promptly.
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: &Submission) -> SubmissionAck;
}

/// Keeps every submission in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<Submission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        lock(&self.received).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.received).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.received).is_empty()
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&self, submission: &Submission) -> SubmissionAck {
        lock(&self.received).push(submission.clone());
        SubmissionAck::Submitted
    }
}

/// Writes each flat answer record as one JSON line.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, submission: &Submission) -> io::Result<()> {
        let mut writer = lock(&self.writer);
        serde_json::to_writer(&mut *writer, &submission.record())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl JsonLinesSink<File> {
    /// Appends to `path`, creating the file when missing.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> SubmissionSink for JsonLinesSink<W> {
    fn submit(&self, submission: &Submission) -> SubmissionAck {
        match self.write_record(submission) {
            Ok(()) => SubmissionAck::Submitted,
            Err(err) => {
                tracing::warn!(form_id = %submission.form_id, error = %err, "failed to write submission");
                SubmissionAck::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Logs the flat record through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn submit(&self, submission: &Submission) -> SubmissionAck {
        tracing::info!(
            form_id = %submission.form_id,
            locale = %submission.locale,
            record = %submission.record(),
            "questionnaire submitted"
        );
        SubmissionAck::Submitted
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
