//! Academic record domain model.
//!
//! The hierarchy is `Session -> Semester`, with each semester's courses held
//! in a separate mapping keyed by semester id. That split mirrors the
//! persisted document shape, where courses live under `semesterCourses`.

use crate::grade::Grade;
use std::collections::BTreeMap;

/// Upper bound on semesters in one session.
pub const MAX_SEMESTERS_PER_SESSION: usize = 3;

/// Name given to the first semester of every new session.
pub const DEFAULT_SEMESTER_NAME: &str = "Semester 1";

/// A gradable unit carrying a letter grade and a credit-unit weight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Course {
    /// Unique across the whole record state, never reused.
    pub id: String,
    pub name: String,
    pub grade: Grade,
    pub units: u32,
}

impl Course {
    /// A blank course: no name, ungraded, zero units.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Weighted points this course contributes (`points * units`).
    pub fn weighted_points(&self) -> f64 {
        self.grade.points() * f64::from(self.units)
    }
}

/// A grading period within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    pub id: String,
    pub name: String,
}

/// A top-level academic period grouping up to three semesters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub name: String,
    /// Display and derivation order.
    pub semesters: Vec<Semester>,
}

impl Session {
    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    pub fn first_semester_id(&self) -> Option<&str> {
        self.semesters.first().map(|s| s.id.as_str())
    }

    pub fn is_full(&self) -> bool {
        self.semesters.len() >= MAX_SEMESTERS_PER_SESSION
    }
}

/// The full persisted snapshot of a student's record.
///
/// Invariant: every semester referenced by a session has an entry (possibly
/// empty) in `courses_by_semester`, and no entry outlives its semester.
///
/// The struct also carries the id sequence used to mint session and semester
/// ids. The sequence is not part of the persisted shape and is ignored by
/// equality.
#[derive(Debug, Clone, Default)]
pub struct RecordState {
    pub sessions: Vec<Session>,
    pub courses_by_semester: BTreeMap<String, Vec<Course>>,
    next_seq: u64,
}

impl PartialEq for RecordState {
    fn eq(&self, other: &Self) -> bool {
        self.sessions == other.sessions && self.courses_by_semester == other.courses_by_semester
    }
}

impl Eq for RecordState {}

impl RecordState {
    /// Builds a state from loaded parts, seeding the id sequence above every
    /// numeric suffix already in use.
    pub fn new(sessions: Vec<Session>, courses_by_semester: BTreeMap<String, Vec<Course>>) -> Self {
        let highest = sessions
            .iter()
            .flat_map(|session| {
                std::iter::once(session.id.as_str())
                    .chain(session.semesters.iter().map(|s| s.id.as_str()))
            })
            .filter_map(trailing_number)
            .max()
            .unwrap_or(0);

        Self {
            sessions,
            courses_by_semester,
            next_seq: highest.saturating_add(1),
        }
    }

    /// A state with no sessions at all. Only valid transiently, before the
    /// first load completes.
    pub fn empty() -> Self {
        Self::new(Vec::new(), BTreeMap::new())
    }

    /// One session holding one empty semester.
    pub fn seeded() -> Self {
        let mut state = Self::empty();
        state.push_default_session();
        state
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub(crate) fn session_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    /// The session owning `semester_id`, if any.
    pub fn session_of(&self, semester_id: &str) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|session| session.semester(semester_id).is_some())
    }

    /// Courses for a semester; empty when the semester has no entry.
    pub fn courses(&self, semester_id: &str) -> &[Course] {
        self.courses_by_semester
            .get(semester_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every semester across all sessions, in session-then-semester order.
    pub fn semesters(&self) -> impl Iterator<Item = &Semester> {
        self.sessions.iter().flat_map(|s| s.semesters.iter())
    }

    pub fn course_count(&self) -> usize {
        self.courses_by_semester.values().map(Vec::len).sum()
    }

    /// True when at least one course in a live semester carries units.
    pub fn has_weighted_course(&self) -> bool {
        self.semesters()
            .any(|semester| self.courses(&semester.id).iter().any(|c| c.units > 0))
    }

    fn contains_id(&self, id: &str) -> bool {
        self.sessions.iter().any(|session| {
            session.id == id || session.semesters.iter().any(|semester| semester.id == id)
        }) || self.courses_by_semester.contains_key(id)
    }

    fn contains_course_id(&self, id: &str) -> bool {
        self.courses_by_semester
            .values()
            .flatten()
            .any(|course| course.id == id)
    }

    /// Mints a session or semester id that no existing entity uses.
    ///
    /// Once the sequence is exhausted, ids take a random suffix instead.
    pub(crate) fn mint_id(&mut self, format: impl Fn(u64) -> String) -> String {
        while let Some(next) = self.next_seq.checked_add(1) {
            let candidate = format(self.next_seq);
            self.next_seq = next;
            if !self.contains_id(&candidate) {
                return candidate;
            }
        }

        loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let candidate = format!("{}-{suffix}", format(self.next_seq));
            if !self.contains_id(&candidate) {
                return candidate;
            }
        }
    }

    /// Mints a course id unique within the state.
    pub(crate) fn mint_course_id(&self) -> String {
        loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if !self.contains_course_id(&candidate) {
                return candidate;
            }
        }
    }

    /// Appends a session with one default semester and registers its empty
    /// course list. Returns the new session id.
    pub(crate) fn push_default_session(&mut self) -> String {
        let session_id = self.mint_id(|n| format!("sess{n}"));
        let semester_id = self.mint_id(|n| format!("{session_id}-sem{n}"));
        let name = format!("Session {}", self.sessions.len() + 1);

        self.sessions.push(Session {
            id: session_id.clone(),
            name,
            semesters: vec![Semester {
                id: semester_id.clone(),
                name: DEFAULT_SEMESTER_NAME.to_string(),
            }],
        });
        self.courses_by_semester.insert(semester_id, Vec::new());
        session_id
    }

    /// Repairs data adopted from a backend so the model invariants hold.
    ///
    /// - an empty session list gets the default session
    /// - a session without semesters gets `Semester 1`
    /// - every semester gets a course-list entry
    /// - course lists of semesters that no longer exist are dropped
    pub fn normalized(mut self) -> Self {
        if self.sessions.is_empty() {
            self.push_default_session();
        }

        let bare: Vec<String> = self
            .sessions
            .iter()
            .filter(|s| s.semesters.is_empty())
            .map(|s| s.id.clone())
            .collect();
        for session_id in bare {
            let semester_id = self.mint_id(|n| format!("{session_id}-sem{n}"));
            if let Some(session) = self.session_mut(&session_id) {
                session.semesters.push(Semester {
                    id: semester_id,
                    name: DEFAULT_SEMESTER_NAME.to_string(),
                });
            }
        }

        let live: Vec<String> = self.semesters().map(|s| s.id.clone()).collect();
        self.courses_by_semester.retain(|id, _| live.contains(id));
        for id in live {
            self.courses_by_semester.entry(id).or_default();
        }
        self
    }
}

fn trailing_number(id: &str) -> Option<u64> {
    let digits: String = id
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}
