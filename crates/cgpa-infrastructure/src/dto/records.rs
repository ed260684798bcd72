//! Record document DTOs and domain conversions.

use cgpa_core::grade::{Grade, parse_units};
use cgpa_core::record::{Course, RecordState, Semester, Session};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The persisted record document.
///
/// Deserialization is lenient: documents written by older clients may carry
/// units as strings or floats, grades in any case, or missing fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDocumentDto {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub sessions: Vec<SessionDto>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub semester_courses: BTreeMap<String, Vec<CourseDto>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub semesters: Vec<SemesterDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade: String,
    #[serde(default, deserialize_with = "lenient_units")]
    pub units: u32,
}

// ============================================================================
// Lenient field decoders
// ============================================================================

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_units<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(units_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<CourseDto>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<Vec<CourseDto>>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(id, courses)| (id, courses.unwrap_or_default()))
        .collect())
}

/// Integer, float (truncated), or numeric text. Negative or anything else is 0.
fn units_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).unwrap_or(u32::MAX)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f > 0.0 => {
                        f.trunc().min(f64::from(u32::MAX)) as u32
                    }
                    _ => 0,
                }
            }
        }
        Value::String(s) => parse_units(s),
        _ => 0,
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl RecordDocumentDto {
    /// Converts the document into a record state.
    ///
    /// Courses without an id get a fresh one so they stay addressable. The
    /// result is not normalized; callers adopt it through `RecordModel::adopt`.
    pub fn into_domain(self) -> RecordState {
        let sessions = self
            .sessions
            .into_iter()
            .map(|session| Session {
                id: session.id,
                name: session.name,
                semesters: session
                    .semesters
                    .into_iter()
                    .map(|semester| Semester {
                        id: semester.id,
                        name: semester.name,
                    })
                    .collect(),
            })
            .collect();

        let courses = self
            .semester_courses
            .into_iter()
            .map(|(semester_id, courses)| {
                let courses = courses
                    .into_iter()
                    .map(|course| Course {
                        id: if course.id.is_empty() {
                            uuid::Uuid::new_v4().to_string()
                        } else {
                            course.id
                        },
                        name: course.name,
                        grade: Grade::parse(&course.grade),
                        units: course.units,
                    })
                    .collect();
                (semester_id, courses)
            })
            .collect();

        RecordState::new(sessions, courses)
    }
}

impl From<&RecordState> for RecordDocumentDto {
    fn from(state: &RecordState) -> Self {
        RecordDocumentDto {
            sessions: state
                .sessions
                .iter()
                .map(|session| SessionDto {
                    id: session.id.clone(),
                    name: session.name.clone(),
                    semesters: session
                        .semesters
                        .iter()
                        .map(|semester| SemesterDto {
                            id: semester.id.clone(),
                            name: semester.name.clone(),
                        })
                        .collect(),
                })
                .collect(),
            semester_courses: state
                .courses_by_semester
                .iter()
                .map(|(semester_id, courses)| {
                    let courses = courses
                        .iter()
                        .map(|course| CourseDto {
                            id: course.id.clone(),
                            name: course.name.clone(),
                            grade: course.grade.as_str().to_string(),
                            units: course.units,
                        })
                        .collect();
                    (semester_id.clone(), courses)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgpa_core::record::{CoursePatch, Mutation, RecordModel};

    fn populated_state() -> RecordState {
        let mut model = RecordModel::seeded().apply(&Mutation::AddSession);
        let first_session = model.state.sessions[0].id.clone();
        model = model.apply(&Mutation::AddSemester {
            session_id: first_session,
        });
        let semester_id = model.state.sessions[0].semesters[1].id.clone();
        model = model
            .apply(&Mutation::AddCourse {
                semester_id: semester_id.clone(),
            })
            .apply(&Mutation::UpdateCourse {
                semester_id,
                index: 0,
                patch: CoursePatch {
                    name: Some("CHM102".to_string()),
                    grade: Some(Grade::C),
                    units: Some(4),
                },
            });
        model.state
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let state = populated_state();
        let json = serde_json::to_string(&RecordDocumentDto::from(&state)).unwrap();
        let loaded: RecordDocumentDto = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.into_domain(), state);
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(RecordDocumentDto::from(&populated_state())).unwrap();
        assert!(value.get("sessions").is_some());
        assert!(value.get("semesterCourses").is_some());
        let course = value["semesterCourses"]
            .as_object()
            .unwrap()
            .values()
            .flat_map(|v| v.as_array().unwrap().iter())
            .next()
            .unwrap();
        assert_eq!(course["grade"], "C");
        assert_eq!(course["units"], 4);
    }

    #[test]
    fn test_lenient_units_and_grades() {
        let json = r#"{
            "sessions": [{"id": "sess1", "name": "2021/2022",
                          "semesters": [{"id": "sess1-sem1", "name": "Semester 1"}]}],
            "semesterCourses": {"sess1-sem1": [
                {"id": "a", "name": "x", "grade": "b", "units": "3"},
                {"id": "b", "name": "y", "grade": "A+", "units": 2.9},
                {"id": "c", "name": "z", "grade": null, "units": -4},
                {"id": "d", "name": "w", "units": "abc"},
                {"id": "e", "name": "v", "units": "99999999999"},
                {"id": "f", "name": "u", "units": 99999999999}
            ]}
        }"#;
        let state = serde_json::from_str::<RecordDocumentDto>(json)
            .unwrap()
            .into_domain();
        let courses = state.courses("sess1-sem1");

        assert_eq!(courses[0].grade, Grade::B);
        assert_eq!(courses[0].units, 3);
        assert_eq!(courses[1].grade, Grade::Ungraded);
        assert_eq!(courses[1].units, 2);
        assert_eq!(courses[2].units, 0);
        assert_eq!(courses[3].grade, Grade::Ungraded);
        assert_eq!(courses[3].units, 0);
        assert_eq!(courses[4].units, u32::MAX);
        assert_eq!(courses[5].units, u32::MAX);
    }

    #[test]
    fn test_missing_course_id_is_filled() {
        let json = r#"{"sessions": [], "semesterCourses": {"s": [{"name": "n"}]}}"#;
        let state = serde_json::from_str::<RecordDocumentDto>(json)
            .unwrap()
            .into_domain();
        assert!(!state.courses("s")[0].id.is_empty());
    }

    #[test]
    fn test_null_collections_default() {
        let json = r#"{"sessions": null, "semesterCourses": null}"#;
        let dto: RecordDocumentDto = serde_json::from_str(json).unwrap();
        assert!(dto.sessions.is_empty());
        assert!(dto.semester_courses.is_empty());
    }
}
