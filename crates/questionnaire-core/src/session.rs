use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use uuid::Uuid;

use crate::controller::{WizardController, WizardView};
use crate::error::WizardError;
use crate::questionnaire::Questionnaire;
use crate::sink::SubmissionSink;

pub type SessionId = Uuid;

/// Isolated wizard sessions for concurrent callers.
///
/// Each session owns its own controller behind its own lock. `with_session`
/// releases the map shard before running the closure, so a sink that is slow
/// to deliver only blocks the session that completed.
pub struct SessionStore {
    questionnaire: Questionnaire,
    sink: Option<Arc<dyn SubmissionSink>>,
    sessions: DashMap<SessionId, Arc<Mutex<WizardController>>>,
}

impl SessionStore {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self {
            questionnaire,
            sink: None,
            sessions: DashMap::new(),
        }
    }

    /// Sink shared by every session started afterwards.
    pub fn with_sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn start(&self) -> SessionId {
        self.insert(self.controller())
    }

    pub fn start_with_locale(&self, locale: &str) -> Result<SessionId, WizardError> {
        let controller = self.controller().with_locale(locale)?;
        Ok(self.insert(controller))
    }

    pub fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut WizardController) -> R,
    ) -> Result<R, WizardError> {
        let session = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(WizardError::UnknownSession(id))?;
        let mut controller = session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut *controller))
    }

    pub fn view(&self, id: SessionId) -> Result<WizardView, WizardError> {
        self.with_session(id, |controller| controller.current_view())?
    }

    /// Discards a session, finished or not. Returns whether it existed.
    pub fn end_session(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            tracing::debug!(session = %id, "session ended");
        }
        removed
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn controller(&self) -> WizardController {
        let controller = self.questionnaire.controller();
        match &self.sink {
            Some(sink) => controller.with_sink(sink.clone()),
            None => controller,
        }
    }

    fn insert(&self, controller: WizardController) -> SessionId {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, locale = controller.state().locale(), "session started");
        self.sessions.insert(id, Arc::new(Mutex::new(controller)));
        id
    }
}
