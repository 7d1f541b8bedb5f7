use metadata_common::transform;
use proptest::prelude::*;

proptest! {
    #[test]
    fn title_is_idempotent(s in ".*") {
        let once = transform::normalize_title(&s);
        let twice = transform::normalize_title(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn abstract_is_idempotent(s in ".*") {
        let once = transform::normalize_abstract(&s);
        let twice = transform::normalize_abstract(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn title_is_idempotent_on_markup(s in "(<[a-z/]{1,4}>|&[a-z]{2,4};|[a-zA-Z \n\t]{0,8}){0,12}") {
        let once = transform::normalize_title(&s);
        prop_assert_eq!(transform::normalize_title(&once), once);
    }

    #[test]
    fn abstract_is_idempotent_on_markup(s in "(</?(p|li|ul|br|b)>|&(amp|lt|gt|nbsp);|[a-zA-Z .\n]{0,8}){0,12}") {
        let once = transform::normalize_abstract(&s);
        prop_assert_eq!(transform::normalize_abstract(&once), once);
    }

    #[test]
    fn nested_escapes_settle_in_one_call(depth in 0usize..120, text in "[a-z]{1,6}") {
        let input = format!("&{}lt;b&gt;{}", "amp;".repeat(depth), text);
        let title = transform::normalize_title(&input);
        prop_assert_eq!(transform::normalize_title(&title), title);
        let summary = transform::normalize_abstract(&input);
        prop_assert_eq!(transform::normalize_abstract(&summary), summary);
    }

    #[test]
    fn title_is_single_trimmed_line(s in ".*") {
        let result = transform::normalize_title(&s);
        prop_assert!(!result.contains("  "));
        prop_assert!(!result.starts_with(' ') && !result.ends_with(' '));
        prop_assert!(!result.chars().any(char::is_control));
    }

    #[test]
    fn keywords_survive_rejoin(s in ".*") {
        let keywords = transform::normalize_keywords(&s);
        let rejoined = transform::normalize_keywords(&transform::join_keywords(&keywords));
        prop_assert_eq!(keywords, rejoined);
    }

    #[test]
    fn keywords_are_unique_ignoring_case(s in "([a-cA-C]{1,3}[,;\n ]{1,2}){0,20}") {
        let keywords = transform::normalize_keywords(&s);
        let mut lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let total = lowered.len();
        lowered.sort();
        lowered.dedup();
        prop_assert_eq!(lowered.len(), total);
        prop_assert!(keywords.iter().all(|k| !k.is_empty() && k.trim() == k));
    }
}
