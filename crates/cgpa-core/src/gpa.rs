//! GPA and CGPA derivation.
//!
//! Pure functions over the record model. Every semester is visited in
//! session-then-semester order as stored, which is also the chart order.

use crate::record::{Course, RecordState, Session};
use std::collections::BTreeMap;

/// Weighted points and units of one course list.
fn totals(courses: &[Course]) -> (f64, f64) {
    courses.iter().fold((0.0, 0.0), |(points, units), course| {
        (points + course.weighted_points(), units + f64::from(course.units))
    })
}

fn ratio(points: f64, units: f64) -> f64 {
    if units > 0.0 { points / units } else { 0.0 }
}

/// `sum(points * units) / sum(units)`, or 0 when no units are recorded.
///
/// Ungraded courses add nothing to the numerator but still count in the
/// denominator.
pub fn semester_gpa(courses: &[Course]) -> f64 {
    let (points, units) = totals(courses);
    ratio(points, units)
}

fn ordered_courses<'a>(
    sessions: &'a [Session],
    courses_by_semester: &'a BTreeMap<String, Vec<Course>>,
) -> impl Iterator<Item = &'a [Course]> + 'a {
    sessions
        .iter()
        .flat_map(|session| session.semesters.iter())
        .map(move |semester| {
            courses_by_semester
                .get(&semester.id)
                .map(Vec::as_slice)
                .unwrap_or(&[])
        })
}

/// Per-semester GPA in display order.
pub fn gpa_series(
    sessions: &[Session],
    courses_by_semester: &BTreeMap<String, Vec<Course>>,
) -> Vec<f64> {
    ordered_courses(sessions, courses_by_semester)
        .map(semester_gpa)
        .collect()
}

/// Running CGPA after each semester, in display order.
///
/// Points and units accumulate across semester (and session) boundaries; the
/// k-th element is the total weighted points of semesters `1..=k` over their
/// total units, or 0 while no units have been recorded.
pub fn cgpa_series(
    sessions: &[Session],
    courses_by_semester: &BTreeMap<String, Vec<Course>>,
) -> Vec<f64> {
    ordered_courses(sessions, courses_by_semester)
        .scan((0.0, 0.0), |(cum_points, cum_units), courses| {
            let (points, units) = totals(courses);
            *cum_points += points;
            *cum_units += units;
            Some(ratio(*cum_points, *cum_units))
        })
        .collect()
}

/// Semester names in display order.
pub fn semester_labels(sessions: &[Session]) -> Vec<String> {
    sessions
        .iter()
        .flat_map(|session| session.semesters.iter())
        .map(|semester| semester.name.clone())
        .collect()
}

/// Rounds to two decimal places. Display only.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Everything a summary panel or chart needs, derived in one pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GpaSummary {
    pub labels: Vec<String>,
    pub gpa_series: Vec<f64>,
    pub cgpa_series: Vec<f64>,
    /// Last element of `cgpa_series` at full precision; 0 with no semesters.
    pub cgpa: f64,
}

impl GpaSummary {
    pub fn from_state(state: &RecordState) -> Self {
        let cgpa_series = cgpa_series(&state.sessions, &state.courses_by_semester);
        Self {
            labels: semester_labels(&state.sessions),
            gpa_series: gpa_series(&state.sessions, &state.courses_by_semester),
            cgpa: cgpa_series.last().copied().unwrap_or(0.0),
            cgpa_series,
        }
    }

    /// The CGPA rounded for display, e.g. `"3.89"`.
    pub fn cgpa_display(&self) -> String {
        format!("{:.2}", round_2dp(self.cgpa))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::record::Semester;

    fn course(grade: Grade, units: u32) -> Course {
        Course {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            grade,
            units,
        }
    }

    fn session(id: &str, semesters: &[&str]) -> Session {
        Session {
            id: id.to_string(),
            name: id.to_string(),
            semesters: semesters
                .iter()
                .map(|s| Semester {
                    id: s.to_string(),
                    name: format!("{s} name"),
                })
                .collect(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_semester_gpa_is_zero() {
        assert_eq!(semester_gpa(&[]), 0.0);
    }

    #[test]
    fn test_weighted_semester_gpa() {
        let gpa = semester_gpa(&[course(Grade::A, 3), course(Grade::B, 2)]);
        assert!(approx(gpa, 4.6));
    }

    #[test]
    fn test_ungraded_units_still_count() {
        assert_eq!(semester_gpa(&[course(Grade::Ungraded, 3)]), 0.0);
        let gpa = semester_gpa(&[course(Grade::A, 2), course(Grade::Ungraded, 2)]);
        assert!(approx(gpa, 2.5));
    }

    #[test]
    fn test_zero_units_gpa_is_zero() {
        assert_eq!(semester_gpa(&[course(Grade::A, 0)]), 0.0);
    }

    #[test]
    fn test_cgpa_accumulates_across_sessions() {
        // (4.6 over 5 units) then (3.0 over 4 units)
        let sessions = vec![session("s1", &["a"]), session("s2", &["b"])];
        let mut courses = BTreeMap::new();
        courses.insert("a".to_string(), vec![course(Grade::A, 3), course(Grade::B, 2)]);
        courses.insert("b".to_string(), vec![course(Grade::C, 4)]);

        let series = cgpa_series(&sessions, &courses);
        assert_eq!(series.len(), 2);
        assert!(approx(series[0], 4.6));
        assert!(approx(series[1], 35.0 / 9.0));
    }

    #[test]
    fn test_cgpa_zero_until_units_appear() {
        let sessions = vec![session("s1", &["a", "b", "c"])];
        let mut courses = BTreeMap::new();
        courses.insert("b".to_string(), vec![course(Grade::B, 2)]);

        let series = cgpa_series(&sessions, &courses);
        assert_eq!(series, vec![0.0, 4.0, 4.0]);
    }

    #[test]
    fn test_series_follow_stored_order_not_names() {
        let sessions = vec![session("s2", &["late"]), session("s1", &["early"])];
        let mut courses = BTreeMap::new();
        courses.insert("late".to_string(), vec![course(Grade::F, 1)]);
        courses.insert("early".to_string(), vec![course(Grade::A, 1)]);

        assert_eq!(gpa_series(&sessions, &courses), vec![0.0, 5.0]);
        assert_eq!(cgpa_series(&sessions, &courses), vec![0.0, 2.5]);
        assert_eq!(semester_labels(&sessions), vec!["late name", "early name"]);
    }

    #[test]
    fn test_summary_rounds_for_display_only() {
        let mut state = RecordState::new(
            vec![session("s1", &["a"]), session("s2", &["b"])],
            BTreeMap::new(),
        );
        state
            .courses_by_semester
            .insert("a".to_string(), vec![course(Grade::A, 3), course(Grade::B, 2)]);
        state
            .courses_by_semester
            .insert("b".to_string(), vec![course(Grade::C, 4)]);

        let summary = GpaSummary::from_state(&state);
        assert!(approx(summary.cgpa, 35.0 / 9.0));
        assert_eq!(summary.cgpa_display(), "3.89");
        assert_eq!(summary.labels.len(), 2);
    }

    #[test]
    fn test_summary_of_empty_state() {
        let summary = GpaSummary::from_state(&RecordState::empty());
        assert_eq!(summary.cgpa, 0.0);
        assert!(summary.cgpa_series.is_empty());
        assert_eq!(summary.cgpa_display(), "0.00");
    }
}
