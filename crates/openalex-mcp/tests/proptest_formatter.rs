//! Property-based tests for the formatters.

use proptest::prelude::*;
use serde_json::{Value, json};

use openalex_mcp::formatters::{
    ABSTRACT_LIMIT, FORMAT_ERROR_MESSAGE, format_paper_value, format_search_summary,
};
use openalex_mcp::models::Work;

/// Arbitrary JSON values of bounded depth.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::hash_map("[a-z_]{1,12}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Records shaped like OpenAlex works, with any field possibly mistyped.
fn arb_work_json() -> impl Strategy<Value = Value> {
    (
        prop::option::of("[A-Za-z ]{0,40}"),
        prop::option::of(1900i64..2030),
        arb_json(),
        prop::collection::vec(arb_json(), 0..30),
        arb_json(),
    )
        .prop_map(|(title, year, citations, authorships, location)| {
            json!({
                "id": "https://openalex.org/W1",
                "title": title,
                "publication_year": year,
                "cited_by_count": citations,
                "authorships": authorships,
                "primary_location": location
            })
        })
}

proptest! {
    /// Paper formatting is total over arbitrary JSON.
    #[test]
    fn paper_formatting_never_panics(value in arb_json()) {
        let text = format_paper_value(value);
        prop_assert!(!text.is_empty());
    }

    /// Any record with a recognised field renders the full document.
    #[test]
    fn work_shaped_records_render_document(value in arb_work_json()) {
        let text = format_paper_value(value);
        prop_assert_ne!(text.as_str(), FORMAT_ERROR_MESSAGE);
        prop_assert!(text.starts_with("# "));
        prop_assert!(text.contains("\n## Publication Information\n"));
        prop_assert!(text.contains("\n## Authors\n"));
        prop_assert!(text.contains("\n## Abstract\n"));
        prop_assert!(text.ends_with('\n'));
    }

    /// Formatting the same record twice gives the same output.
    #[test]
    fn paper_formatting_idempotent(value in arb_json()) {
        prop_assert_eq!(format_paper_value(value.clone()), format_paper_value(value));
    }

    /// Abstracts never exceed the limit plus the ellipsis.
    #[test]
    fn abstract_is_bounded(len in 0usize..8000) {
        let text = format_paper_value(json!({"title": "T", "abstract": "x".repeat(len)}));
        let longest_run = text.split(|c| c != 'x').map(str::len).max().unwrap_or(0);
        prop_assert!(longest_run <= ABSTRACT_LIMIT);
        prop_assert_eq!(text.contains("*Note: Abstract has been truncated"), len > ABSTRACT_LIMIT);
    }

    /// Summaries number one entry per work.
    #[test]
    fn summary_has_one_entry_per_work(values in prop::collection::vec(arb_json(), 1..8)) {
        let works: Vec<Work> = values.into_iter().map(Work::from_value).collect();
        let text = format_search_summary("q", &works);
        prop_assert_eq!(text.matches("Resource URI: paper://").count(), works.len());
        let last_entry = format!("{}. **", works.len());
        prop_assert!(text.contains(&last_entry));
    }
}
