//! Letter grades and their point values.
//!
//! The scale is the five-point table `A=5 .. E=1, F=0`. Anything that does not
//! name one of those letters is treated as ungraded and carries zero points.

use std::fmt;

/// A letter grade attached to a course.
///
/// `Ungraded` is the blank selection a freshly added course starts with. It
/// contributes zero points, but the course's units still count toward the
/// semester total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
    #[default]
    Ungraded,
}

impl Grade {
    /// All selectable grades, in display order.
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    /// Parses a grade case-insensitively. Unknown text is `Ungraded`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            "D" => Grade::D,
            "E" => Grade::E,
            "F" => Grade::F,
            _ => Grade::Ungraded,
        }
    }

    /// The persisted spelling: `"A"`..`"F"`, or `""` when ungraded.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::Ungraded => "",
        }
    }

    /// Point value of this grade on the five-point scale.
    pub fn points(&self) -> f64 {
        match self {
            Grade::A => 5.0,
            Grade::B => 4.0,
            Grade::C => 3.0,
            Grade::D => 2.0,
            Grade::E => 1.0,
            Grade::F | Grade::Ungraded => 0.0,
        }
    }

    pub fn is_graded(&self) -> bool {
        !matches!(self, Grade::Ungraded)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Grade {
    fn from(value: &str) -> Self {
        Grade::parse(value)
    }
}

/// Maps raw grade text to points. Total: never fails.
pub struct GradeScale;

impl GradeScale {
    /// Returns the point value for `grade`, ignoring case. Unknown input
    /// (including the empty string) is worth 0.
    pub fn points(grade: &str) -> f64 {
        Grade::parse(grade).points()
    }
}

/// Parses a units field the way a numeric text input would.
///
/// Reads the leading run of digits after trimming; a leading `-` or no digits
/// at all yields 0. `"3.7"` is 3, `"12abc"` is 12. A digit run too large for
/// `u32` saturates at `u32::MAX`.
pub fn parse_units(input: &str) -> u32 {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(GradeScale::points("A"), 5.0);
        assert_eq!(GradeScale::points("B"), 4.0);
        assert_eq!(GradeScale::points("C"), 3.0);
        assert_eq!(GradeScale::points("D"), 2.0);
        assert_eq!(GradeScale::points("E"), 1.0);
        assert_eq!(GradeScale::points("F"), 0.0);
    }

    #[test]
    fn test_points_case_insensitive() {
        assert_eq!(GradeScale::points("a"), 5.0);
        assert_eq!(GradeScale::points("c"), 3.0);
    }

    #[test]
    fn test_unknown_and_empty_are_zero() {
        assert_eq!(GradeScale::points(""), 0.0);
        assert_eq!(GradeScale::points("A+"), 0.0);
        assert_eq!(GradeScale::points("Z"), 0.0);
        assert_eq!(Grade::parse("pass"), Grade::Ungraded);
    }

    #[test]
    fn test_as_str_matches_parse() {
        for grade in Grade::ALL {
            assert_eq!(Grade::parse(grade.as_str()), grade);
        }
        assert_eq!(Grade::Ungraded.as_str(), "");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("3"), 3);
        assert_eq!(parse_units(" 4 "), 4);
        assert_eq!(parse_units("3.7"), 3);
        assert_eq!(parse_units("12abc"), 12);
        assert_eq!(parse_units("abc"), 0);
        assert_eq!(parse_units("-2"), 0);
        assert_eq!(parse_units(""), 0);
        assert_eq!(parse_units("99999999999"), u32::MAX);
        assert_eq!(parse_units("0004"), 4);
    }
}
