//! Lenient parsing of free-text columns
//!
//! Every function returns `None` instead of failing, so one malformed row
//! only drops out of (or sorts last in) its report.

/// Leading integer of the first whitespace-separated token.
///
/// `"3 years"` → 3, `"5+ yrs"` → 5, `"senior"` → `None`.
pub fn leading_integer(text: &str) -> Option<u32> {
    let token = text.split_whitespace().next()?;
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Upper bound of a `"<low>-<high>"` range: the leading number after the
/// last `-`. A range without `-` is read as a single figure.
///
/// Digit-group commas are accepted (`"90,000-120,000"`).
pub fn salary_upper_bound(range: &str) -> Option<u64> {
    let upper = range.rsplit('-').next()?;
    leading_amount(upper)
}

/// Both bounds of a `"<low>-<high>"` range when they parse and `low <= high`.
pub fn salary_bounds(range: &str) -> Option<(u64, u64)> {
    let (low, high) = range.split_once('-')?;
    let low = leading_amount(low)?;
    let high = leading_amount(high)?;
    (low <= high).then_some((low, high))
}

/// Skill tokens of a comma-separated list, trimmed, blanks dropped.
pub fn skill_tokens(skills: &str) -> impl Iterator<Item = &str> {
    skills.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn leading_amount(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let mut digits = String::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == ',' && !digits.is_empty() {
            // keep going only if a digit follows the separator
            let mut ahead = chars.clone();
            ahead.next();
            if !matches!(ahead.peek(), Some(d) if d.is_ascii_digit()) {
                break;
            }
        } else {
            break;
        }
        chars.next();
    }
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience() {
        assert_eq!(leading_integer("3 years"), Some(3));
        assert_eq!(leading_integer("  10 yrs"), Some(10));
        assert_eq!(leading_integer("5+ years"), Some(5));
        assert_eq!(leading_integer("7"), Some(7));
        assert_eq!(leading_integer("years: 3"), None);
        assert_eq!(leading_integer(""), None);
        assert_eq!(leading_integer("99999999999 years"), None);
    }

    #[test]
    fn upper_bound() {
        assert_eq!(salary_upper_bound("120000-150000"), Some(150_000));
        assert_eq!(salary_upper_bound("120000 - 150000"), Some(150_000));
        assert_eq!(salary_upper_bound("90,000-120,000"), Some(120_000));
        assert_eq!(salary_upper_bound("150000"), Some(150_000));
        assert_eq!(salary_upper_bound("150000 EUR"), Some(150_000));
        assert_eq!(salary_upper_bound("negotiable"), None);
        assert_eq!(salary_upper_bound("100000-"), None);
        assert_eq!(salary_upper_bound(""), None);
        assert_eq!(salary_upper_bound("1,-2"), Some(2));
    }

    #[test]
    fn bounds() {
        assert_eq!(salary_bounds("80000-95000"), Some((80_000, 95_000)));
        assert_eq!(salary_bounds("95000-80000"), None);
        assert_eq!(salary_bounds("95000"), None);
        assert_eq!(salary_bounds("a-b"), None);
    }

    #[test]
    fn tokens() {
        let t: Vec<_> = skill_tokens(" Python, SQL ,,Java ").collect();
        assert_eq!(t, vec!["Python", "SQL", "Java"]);
        assert_eq!(skill_tokens("").count(), 0);
    }
}
