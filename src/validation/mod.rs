//! Field validation as an ordered list of checks.
//!
//! Every check of a list is evaluated, in order, so the failure set is
//! deterministic. Callers report the first failure's message and may log the
//! rest.

use std::fmt;

/// One rule: `predicate` must hold for the input, otherwise `field` is
/// reported with `message`.
pub struct Check<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub predicate: fn(&T) -> bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failed checks of one validation run, in declaration order. Never empty.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    /// Message of the first failed check
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("validation failed")
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationFailure {}

/// Evaluate every check against `input`
pub fn run<T>(input: &T, checks: &[Check<T>]) -> Result<(), ValidationFailure> {
    let errors: Vec<FieldError> = checks
        .iter()
        .filter(|check| !(check.predicate)(input))
        .map(|check| FieldError {
            field: check.field,
            message: check.message.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { errors })
    }
}

/// Range check that leaves absence to a separate `required` check
pub fn in_range(value: Option<i64>, min: i64, max: i64) -> bool {
    value.map_or(true, |v| (min..=max).contains(&v))
}

/// Present and not only whitespace
pub fn not_blank(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: i64,
        b: i64,
    }

    fn checks() -> [Check<Pair>; 2] {
        [
            Check { field: "a", message: "a must be positive", predicate: |p| p.a > 0 },
            Check { field: "b", message: "b must be positive", predicate: |p| p.b > 0 },
        ]
    }

    #[test]
    fn passes_when_all_hold() {
        assert!(run(&Pair { a: 1, b: 2 }, &checks()).is_ok());
    }

    #[test]
    fn keeps_declaration_order() {
        let failure = run(&Pair { a: 0, b: 0 }, &checks()).unwrap_err();
        assert_eq!(failure.message(), "a must be positive");
        assert_eq!(failure.errors()[1].field, "b");
        assert_eq!(failure.to_string(), "a must be positive");
    }

    #[test]
    fn range_and_blank_helpers() {
        assert!(in_range(None, 0, 100));
        assert!(in_range(Some(100), 0, 100));
        assert!(!in_range(Some(101), 0, 100));
        assert!(!not_blank(None));
        assert!(!not_blank(Some(" \t")));
        assert!(not_blank(Some("Alice")));
    }
}
