//! Active session/semester selection.

use super::model::RecordState;
use std::collections::HashMap;

/// Which session and semester the user is looking at.
///
/// Held next to the record state but never persisted with it. The
/// per-session memory lets a session switch restore the semester that was
/// last viewed there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveSelection {
    pub active_session_id: Option<String>,
    pub active_semester_id: Option<String>,
    pub last_semester_per_session: HashMap<String, String>,
}

impl ActiveSelection {
    /// Selects the first session and its first semester of `state`.
    pub fn first_of(state: &RecordState) -> Self {
        let mut selection = Self::default();
        selection.reset_to_first(state);
        selection
    }

    pub(crate) fn reset_to_first(&mut self, state: &RecordState) {
        let first = state.sessions.first();
        self.active_session_id = first.map(|s| s.id.clone());
        self.active_semester_id = first.and_then(|s| s.first_semester_id()).map(str::to_string);
    }

    /// Activates a session, restoring its remembered semester when that
    /// semester still exists, otherwise its first semester.
    pub(crate) fn select_session(&mut self, state: &RecordState, session_id: &str) {
        let Some(session) = state.session(session_id) else {
            return;
        };
        let remembered = self
            .last_semester_per_session
            .get(session_id)
            .filter(|id| session.semester(id).is_some())
            .cloned();

        self.active_session_id = Some(session_id.to_string());
        self.active_semester_id =
            remembered.or_else(|| session.first_semester_id().map(str::to_string));
    }

    /// Activates a semester of the active session and remembers it.
    pub(crate) fn select_semester(&mut self, state: &RecordState, semester_id: &str) {
        let Some(session) = state.session_of(semester_id) else {
            return;
        };
        if self.active_session_id.as_deref() != Some(session.id.as_str()) {
            return;
        }
        self.active_semester_id = Some(semester_id.to_string());
        self.last_semester_per_session
            .insert(session.id.clone(), semester_id.to_string());
    }

    /// Activates a semester without touching the per-session memory.
    pub(crate) fn focus(&mut self, session_id: &str, semester_id: Option<&str>) {
        self.active_session_id = Some(session_id.to_string());
        self.active_semester_id = semester_id.map(str::to_string);
    }

    /// Drops memory entries whose session or semester is gone.
    pub(crate) fn prune(&mut self, state: &RecordState) {
        self.last_semester_per_session.retain(|session_id, semester_id| {
            state
                .session(session_id)
                .is_some_and(|s| s.semester(semester_id).is_some())
        });
    }

    /// True when the active semester belongs to the active session.
    pub fn is_consistent(&self, state: &RecordState) -> bool {
        match (&self.active_session_id, &self.active_semester_id) {
            (Some(session_id), Some(semester_id)) => state
                .session(session_id)
                .is_some_and(|s| s.semester(semester_id).is_some()),
            (None, None) => state.is_empty(),
            _ => false,
        }
    }
}
