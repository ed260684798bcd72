//! Plain-text rendering of the record model.

use cgpa_core::RecordModel;
use cgpa_core::gpa::round_2dp;
use std::fmt::Write;

pub fn print(model: &RecordModel) {
    print!("{}", render(model));
}

pub fn render(model: &RecordModel) -> String {
    let summary = model.summary();
    let mut gpas = summary.gpa_series.iter().zip(&summary.cgpa_series);
    let mut out = String::new();

    for session in &model.state.sessions {
        let _ = writeln!(out, "{} [{}]", session.name, session.id);
        for semester in &session.semesters {
            let (gpa, cgpa) = gpas.next().map(|(g, c)| (*g, *c)).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} [{}]  GPA {:.2}  CGPA {:.2}",
                semester.name,
                semester.id,
                round_2dp(gpa),
                round_2dp(cgpa)
            );
            for (index, course) in model.state.courses(&semester.id).iter().enumerate() {
                let grade = if course.grade.is_graded() {
                    course.grade.as_str()
                } else {
                    "-"
                };
                let name = if course.name.is_empty() {
                    "(unnamed)"
                } else {
                    course.name.as_str()
                };
                let _ = writeln!(
                    out,
                    "    {}. {:<12} {:>2} {:>3}",
                    index, name, grade, course.units
                );
            }
        }
    }

    let _ = writeln!(out, "CGPA {}", summary.cgpa_display());
    out
}
