//! Database layer - connection provider and repositories
//!
//! # Design Principles
//!
//! - One connection per call, no pool: `Database::acquire` opens it, the
//!   `ScopedConnection` guard closes it on every exit path
//! - Every external value is bound as a parameter, never interpolated
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - A transaction never spans more than one logical write

pub mod connection;
pub mod repos;

pub use connection::{Database, ScopedConnection};
pub use repos::*;

/// Turn user input into a LIKE pattern matching it as a literal substring.
///
/// `%`, `_` and `\` are escaped so "C_" does not match "C#".
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_substring() {
        assert_eq!(contains_pattern("Python"), "%Python%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("C_"), r"%C\_%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn quotes_pass_through_as_data() {
        // Bound as a parameter, so quotes are inert
        assert_eq!(contains_pattern("x' OR '1'='1"), "%x' OR '1'='1%");
    }
}
