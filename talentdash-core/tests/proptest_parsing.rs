use proptest::prelude::*;
use talentdash_core::reports::catalog::{filter_min_experience, rank_by_upper_salary, top_skills};
use talentdash_core::reports::parse::{leading_integer, salary_bounds, salary_upper_bound, skill_tokens};
use talentdash_core::reports::{RecruiterJob, SkillJob};

fn arb_skill_job() -> impl Strategy<Value = SkillJob> {
    (
        "[a-z]{1,8}",
        prop::option::of(prop_oneof![
            (0u32..500_000, 0u32..500_000).prop_map(|(a, b)| format!("{}-{}", a, b)),
            ".{0,16}",
        ]),
    )
        .prop_map(|(title, salary_range)| SkillJob {
            title: Some(title),
            location: None,
            salary_range,
            skills: Some("Python".into()),
        })
}

proptest! {
    /// Property: free-text parsers never panic
    #[test]
    fn prop_parsers_never_panic(text in ".*") {
        let _ = leading_integer(&text);
        let _ = salary_upper_bound(&text);
        let _ = salary_bounds(&text);
        let _ = skill_tokens(&text).count();
    }

    /// Property: well-formed ranges parse back to their bounds
    #[test]
    fn prop_well_formed_range(low in 0u64..1_000_000, span in 0u64..1_000_000) {
        let high = low + span;
        let range = format!("{}-{}", low, high);
        prop_assert_eq!(salary_upper_bound(&range), Some(high));
        prop_assert_eq!(salary_bounds(&range), Some((low, high)));
    }

    /// Property: "<n> years" always yields n
    #[test]
    fn prop_experience_years(n in 0u32..100, unit in "(years|yrs|year)") {
        prop_assert_eq!(leading_integer(&format!("{} {}", n, unit)), Some(n));
    }

    /// Property: skill tokens are trimmed and never empty
    #[test]
    fn prop_skill_tokens_trimmed(field in "[ a-zA-Z,]{0,40}") {
        for token in skill_tokens(&field) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token, token.trim());
        }
    }

    /// Property: top skills are sorted by count and never exceed the limit
    #[test]
    fn prop_top_skills_sorted(fields in prop::collection::vec("[abc, ]{0,12}", 0..20), limit in 0usize..5) {
        let top = top_skills(fields.iter().map(String::as_str), limit);
        prop_assert!(top.len() <= limit);
        for pair in top.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    /// Property: ranking keeps parsable salaries ahead of unparsable ones
    #[test]
    fn prop_unparsable_salaries_sort_last(jobs in prop::collection::vec(arb_skill_job(), 0..30)) {
        let n = jobs.len();
        let ranked = rank_by_upper_salary(jobs, n);
        prop_assert_eq!(ranked.len(), n);

        let bounds: Vec<Option<u64>> = ranked.iter().map(SkillJob::salary_upper_bound).collect();
        if let Some(first_none) = bounds.iter().position(Option::is_none) {
            prop_assert!(bounds[first_none..].iter().all(Option::is_none));
        }
        for pair in bounds.windows(2) {
            if let (Some(a), Some(b)) = (pair[0], pair[1]) {
                prop_assert!(a >= b);
            }
        }
    }

    /// Property: experience filter keeps exactly the rows at or above the threshold
    #[test]
    fn prop_min_experience(years in prop::collection::vec(prop::option::of(0u32..20), 0..20), min in 0u32..20) {
        let rows: Vec<RecruiterJob> = years
            .iter()
            .map(|y| RecruiterJob {
                contact_person: "Jane Roe".into(),
                company: None,
                title: None,
                experience: y.map(|y| format!("{} years", y)),
            })
            .collect();
        let expected = years.iter().filter(|y| y.is_some_and(|y| y >= min)).count();
        let kept = filter_min_experience(rows, min);
        prop_assert_eq!(kept.len(), expected);
    }
}
