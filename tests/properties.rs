//! Property tests for identifier normalization, rendering and matching.

use collection_runner::collection::suggest::{closest_match, similarity};
use collection_runner::environment::EnvironmentStore;
use collection_runner::parser::names::{normalize_class_name, normalize_func_name};
use collection_runner::variables::{render, substitute_variables};
use proptest::prelude::*;
use serde_json::{json, Value};

proptest! {
    #[test]
    fn test_func_name_is_idempotent(name in "[a-zA-Z0-9 _!?.()-]{0,40}") {
        let once = normalize_func_name(&name);
        prop_assert_eq!(normalize_func_name(&once), once.clone());
        prop_assert!(!once.contains(char::is_whitespace));
        prop_assert!(!once.starts_with('_') && !once.ends_with('_'));
        prop_assert_eq!(once.to_lowercase(), once);
    }

    #[test]
    fn test_class_name_has_no_separators(name in "[a-zA-Z0-9 _!?.()-]{0,40}") {
        let class = normalize_class_name(&name);
        prop_assert!(class.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_text_without_braces_renders_unchanged(text in "[^{}]{0,60}") {
        let env = EnvironmentStore::new();
        prop_assert_eq!(substitute_variables(&text, &env).unwrap(), text);
    }

    #[test]
    fn test_placeholder_resolves_case_insensitively(
        name in "[a-z][a-z0-9_]{0,12}",
        value in "[a-zA-Z0-9 ./:]{0,20}",
    ) {
        let mut env = EnvironmentStore::new();
        env.set(&name.to_uppercase(), value.clone());

        let template = json!({"url": format!("{{{{{}}}}}/x", name), "n": 1});
        let rendered = render(&template, &env).unwrap();
        prop_assert_eq!(rendered, json!({"url": format!("{}/x", value), "n": 1}));
    }

    #[test]
    fn test_missing_placeholder_names_the_variable(name in "[a-z][a-z0-9_]{0,12}") {
        let env = EnvironmentStore::new();
        let err = render(&Value::String(format!("{{{{ {} }}}}", name)), &env).unwrap_err();
        let needle = format!("`{}`", name);
        prop_assert!(err.to_string().contains(&needle));
    }

    #[test]
    fn test_similarity_bounds(a in "[a-z_]{0,16}", b in "[a-z_]{0,16}") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_exact_candidate_is_closest(
        candidates in prop::collection::vec("[a-z_]{1,12}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = pick.get(&candidates).clone();
        let best = closest_match(&target, candidates.iter().map(String::as_str));
        prop_assert_eq!(best, Some(target.as_str()));
    }
}
