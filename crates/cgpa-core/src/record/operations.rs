//! Pure record operations.
//!
//! Every function takes the current state by reference and returns the next
//! state. Operations whose precondition does not hold return an unchanged
//! copy, so a caller can never observe a half-applied change.

use super::model::{Course, RecordState, Semester};
use super::mutation::CoursePatch;

/// Appends a new session with one default semester.
pub fn add_session(state: &RecordState) -> RecordState {
    let mut next = state.clone();
    next.push_default_session();
    next
}

/// Removes a session and every course list of its semesters.
///
/// Rejected when it is the only session, or when the id is unknown.
pub fn delete_session(state: &RecordState, session_id: &str) -> RecordState {
    if state.sessions.len() <= 1 {
        return state.clone();
    }
    let Some(session) = state.session(session_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    for semester in &session.semesters {
        next.courses_by_semester.remove(&semester.id);
    }
    next.sessions.retain(|s| s.id != session_id);
    next
}

/// Renames a session. Any name is accepted, including the empty string.
pub fn rename_session(state: &RecordState, session_id: &str, name: &str) -> RecordState {
    let mut next = state.clone();
    if let Some(session) = next.session_mut(session_id) {
        session.name = name.to_string();
    }
    next
}

/// Appends `Semester {count + 1}` with an empty course list.
///
/// Rejected when the session already holds the maximum number of semesters.
pub fn add_semester(state: &RecordState, session_id: &str) -> RecordState {
    match state.session(session_id) {
        Some(session) if !session.is_full() => {}
        _ => return state.clone(),
    }

    let mut next = state.clone();
    let semester_id = next.mint_id(|n| format!("{session_id}-sem{n}"));
    if let Some(session) = next.session_mut(session_id) {
        let name = format!("Semester {}", session.semesters.len() + 1);
        session.semesters.push(Semester {
            id: semester_id.clone(),
            name,
        });
    }
    next.courses_by_semester.insert(semester_id, Vec::new());
    next
}

/// Removes a semester and its course list.
///
/// Rejected when it is the session's only semester, or when either id is
/// unknown.
pub fn delete_semester(state: &RecordState, session_id: &str, semester_id: &str) -> RecordState {
    match state.session(session_id) {
        Some(session)
            if session.semesters.len() > 1 && session.semester(semester_id).is_some() => {}
        _ => return state.clone(),
    }

    let mut next = state.clone();
    if let Some(session) = next.session_mut(session_id) {
        session.semesters.retain(|s| s.id != semester_id);
    }
    next.courses_by_semester.remove(semester_id);
    next
}

/// Appends a blank course with a freshly minted id.
pub fn add_course(state: &RecordState, semester_id: &str) -> RecordState {
    if state.session_of(semester_id).is_none() {
        return state.clone();
    }

    let mut next = state.clone();
    let course = Course::blank(next.mint_course_id());
    next.courses_by_semester
        .entry(semester_id.to_string())
        .or_default()
        .push(course);
    next
}

/// Merges `patch` onto the course at `index`.
///
/// The caller must only pass an index that exists. A violation is logged and
/// leaves the state unchanged.
pub fn update_course(
    state: &RecordState,
    semester_id: &str,
    index: usize,
    patch: &CoursePatch,
) -> RecordState {
    let mut next = state.clone();
    let Some(course) = next
        .courses_by_semester
        .get_mut(semester_id)
        .and_then(|courses| courses.get_mut(index))
    else {
        tracing::warn!(semester_id, index, "update_course called with an out-of-range index");
        return state.clone();
    };

    if let Some(name) = &patch.name {
        course.name = name.clone();
    }
    if let Some(grade) = patch.grade {
        course.grade = grade;
    }
    if let Some(units) = patch.units {
        course.units = units;
    }
    next
}

/// Removes the course at `index`, keeping the order of the rest.
///
/// Same precondition as [`update_course`].
pub fn delete_course(state: &RecordState, semester_id: &str, index: usize) -> RecordState {
    let in_range = state
        .courses_by_semester
        .get(semester_id)
        .is_some_and(|courses| index < courses.len());
    if !in_range {
        tracing::warn!(semester_id, index, "delete_course called with an out-of-range index");
        return state.clone();
    }

    let mut next = state.clone();
    if let Some(courses) = next.courses_by_semester.get_mut(semester_id) {
        courses.remove(index);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::record::model::{MAX_SEMESTERS_PER_SESSION, Session};
    use std::collections::{BTreeMap, HashSet};

    fn first_ids(state: &RecordState) -> (String, String) {
        let session = &state.sessions[0];
        (session.id.clone(), session.semesters[0].id.clone())
    }

    #[test]
    fn test_add_session_registers_course_list() {
        let state = add_session(&RecordState::seeded());
        assert_eq!(state.sessions.len(), 2);

        let added = &state.sessions[1];
        assert_eq!(added.name, "Session 2");
        assert_eq!(added.semesters.len(), 1);
        assert_eq!(added.semesters[0].name, "Semester 1");
        assert!(state.courses_by_semester.contains_key(&added.semesters[0].id));
    }

    #[test]
    fn test_session_ids_never_collide() {
        let mut state = RecordState::seeded();
        for _ in 0..5 {
            state = add_session(&state);
        }
        // Delete from the middle and keep adding: earlier bugs reused ids
        // derived from the session count.
        let victim = state.sessions[2].id.clone();
        state = delete_session(&state, &victim);
        for _ in 0..3 {
            state = add_session(&state);
        }

        let ids: HashSet<_> = state.sessions.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), state.sessions.len());
        assert!(!ids.contains(&victim));
    }

    #[test]
    fn test_add_session_after_maximal_loaded_suffix() {
        let semester_id = format!("sess{}-sem1", u64::MAX);
        let mut courses = BTreeMap::new();
        courses.insert(semester_id.clone(), Vec::new());
        let loaded = RecordState::new(
            vec![Session {
                id: format!("sess{}", u64::MAX),
                name: "2021/2022".to_string(),
                semesters: vec![Semester {
                    id: semester_id,
                    name: "Semester 1".to_string(),
                }],
            }],
            courses,
        );

        let state = add_session(&add_session(&loaded));
        let ids: HashSet<_> = state.sessions.iter().map(|s| s.id.clone()).collect();
        assert_eq!(state.sessions.len(), 3);
        assert_eq!(ids.len(), 3);
        let semesters: HashSet<_> = state.semesters().map(|s| s.id.clone()).collect();
        assert_eq!(semesters.len(), 3);
    }

    #[test]
    fn test_delete_only_session_is_noop() {
        let state = RecordState::seeded();
        let (session_id, _) = first_ids(&state);
        assert_eq!(delete_session(&state, &session_id), state);
    }

    #[test]
    fn test_delete_session_removes_course_lists() {
        let state = add_session(&RecordState::seeded());
        let state = add_semester(&state, &state.sessions[1].id.clone());
        let doomed = state.sessions[1].clone();

        let next = delete_session(&state, &doomed.id);
        assert_eq!(next.sessions.len(), 1);
        for semester in &doomed.semesters {
            assert!(!next.courses_by_semester.contains_key(&semester.id));
        }
    }

    #[test]
    fn test_delete_unknown_session_is_noop() {
        let state = add_session(&RecordState::seeded());
        assert_eq!(delete_session(&state, "nope"), state);
    }

    #[test]
    fn test_rename_session_allows_empty() {
        let state = RecordState::seeded();
        let (session_id, _) = first_ids(&state);

        let renamed = rename_session(&state, &session_id, "2023/2024");
        assert_eq!(renamed.sessions[0].name, "2023/2024");

        let blank = rename_session(&renamed, &session_id, "");
        assert_eq!(blank.sessions[0].name, "");
    }

    #[test]
    fn test_add_semester_caps_at_three() {
        let mut state = RecordState::seeded();
        let (session_id, _) = first_ids(&state);
        for _ in 1..MAX_SEMESTERS_PER_SESSION {
            state = add_semester(&state, &session_id);
        }
        assert_eq!(state.sessions[0].semesters.len(), 3);
        assert_eq!(state.sessions[0].semesters[2].name, "Semester 3");

        let capped = add_semester(&state, &session_id);
        assert_eq!(capped, state);
    }

    #[test]
    fn test_semester_ids_unique_after_delete_and_add() {
        let state = RecordState::seeded();
        let (session_id, _) = first_ids(&state);
        let state = add_semester(&add_semester(&state, &session_id), &session_id);
        let middle = state.sessions[0].semesters[1].id.clone();
        let state = delete_semester(&state, &session_id, &middle);
        let state = add_semester(&state, &session_id);

        let ids: HashSet<_> = state.semesters().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&middle));
    }

    #[test]
    fn test_delete_only_semester_is_noop() {
        let state = RecordState::seeded();
        let (session_id, semester_id) = first_ids(&state);
        assert_eq!(delete_semester(&state, &session_id, &semester_id), state);
    }

    #[test]
    fn test_delete_semester_removes_course_list() {
        let state = RecordState::seeded();
        let (session_id, semester_id) = first_ids(&state);
        let state = add_course(&add_semester(&state, &session_id), &semester_id);

        let next = delete_semester(&state, &session_id, &semester_id);
        assert_eq!(next.sessions[0].semesters.len(), 1);
        assert!(!next.courses_by_semester.contains_key(&semester_id));
    }

    #[test]
    fn test_add_course_is_blank_with_unique_id() {
        let state = RecordState::seeded();
        let (_, semester_id) = first_ids(&state);
        let state = add_course(&add_course(&state, &semester_id), &semester_id);

        let courses = state.courses(&semester_id);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "");
        assert_eq!(courses[0].grade, Grade::Ungraded);
        assert_eq!(courses[0].units, 0);
        assert_ne!(courses[0].id, courses[1].id);
    }

    #[test]
    fn test_add_course_to_unknown_semester_is_noop() {
        let state = RecordState::seeded();
        assert_eq!(add_course(&state, "missing"), state);
    }

    #[test]
    fn test_update_course_merges_patch() {
        let state = RecordState::seeded();
        let (_, semester_id) = first_ids(&state);
        let state = add_course(&state, &semester_id);
        let id = state.courses(&semester_id)[0].id.clone();

        let state = update_course(&state, &semester_id, 0, &CoursePatch::name("MTH101"));
        let state = update_course(&state, &semester_id, 0, &CoursePatch::grade(Grade::B));
        let state = update_course(&state, &semester_id, 0, &CoursePatch::units(3));

        let course = &state.courses(&semester_id)[0];
        assert_eq!(course.id, id);
        assert_eq!(course.name, "MTH101");
        assert_eq!(course.grade, Grade::B);
        assert_eq!(course.units, 3);
    }

    #[test]
    fn test_update_course_out_of_range_leaves_state() {
        let state = RecordState::seeded();
        let (_, semester_id) = first_ids(&state);
        let next = update_course(&state, &semester_id, 4, &CoursePatch::units(2));
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_course_preserves_order() {
        let state = RecordState::seeded();
        let (_, semester_id) = first_ids(&state);
        let mut state = state;
        for name in ["first", "second", "third"] {
            state = add_course(&state, &semester_id);
            let last = state.courses(&semester_id).len() - 1;
            state = update_course(&state, &semester_id, last, &CoursePatch::name(name));
        }

        let state = delete_course(&state, &semester_id, 1);
        let names: Vec<_> = state
            .courses(&semester_id)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "third"]);
    }

    #[test]
    fn test_delete_course_out_of_range_leaves_state() {
        let state = RecordState::seeded();
        let (_, semester_id) = first_ids(&state);
        assert_eq!(delete_course(&state, &semester_id, 0), state);
    }
}
