//! Contract Test: Derived Views
//!
//! Constraints verified:
//! - search matches code or target URL, case-insensitively
//! - an empty search term returns the full set
//! - sorting is a permutation of the filtered set for every field/order
//! - never-clicked records sort last regardless of direction
//! - deriving a view never mutates the registry

mod common;

use common::*;
use std::sync::Arc;
use tinylink_core::registry::view;
use tinylink_core::{ClientConfig, LinkRegistry, SortField, SortOrder, ViewQuery};

const FIELDS: [SortField; 5] = [
    SortField::Code,
    SortField::TargetUrl,
    SortField::Clicks,
    SortField::CreatedAt,
    SortField::LastClicked,
];

const ORDERS: [SortOrder; 2] = [SortOrder::Asc, SortOrder::Desc];

fn sorted_codes(records: &[tinylink_core::LinkRecord]) -> Vec<String> {
    let mut codes: Vec<String> = records.iter().map(|r| r.code.clone()).collect();
    codes.sort();
    codes
}

#[test]
fn search_only_returns_matching_records() {
    let links = sample_links();

    for term in ["DOCS", "example", "zeta", "rs", "123", "no-such-thing"] {
        let lowered = term.to_lowercase();
        let out = view::apply(&links, &ViewQuery::new().search(term));

        for record in &out {
            assert!(
                record.code.to_lowercase().contains(&lowered)
                    || record.target_url.to_lowercase().contains(&lowered),
                "{} does not match {}",
                record.code,
                term
            );
        }

        let expected = links
            .iter()
            .filter(|r| {
                r.code.to_lowercase().contains(&lowered)
                    || r.target_url.to_lowercase().contains(&lowered)
            })
            .count();
        assert_eq!(out.len(), expected, "term {term}");
    }

    assert_eq!(view::apply(&links, &ViewQuery::new().search("")), links);
}

#[test]
fn sorting_is_a_permutation_of_the_filtered_set() {
    let links = sample_links();

    for term in ["", "example", "docs"] {
        let filtered = view::apply(&links, &ViewQuery::new().search(term));
        for field in FIELDS {
            for order in ORDERS {
                let out = view::apply(&links, &ViewQuery::new().search(term).sort_by(field, order));
                assert_eq!(out.len(), filtered.len(), "{field} {order}");
                assert_eq!(sorted_codes(&out), sorted_codes(&filtered), "{field} {order}");
            }
        }
    }
}

#[test]
fn never_clicked_records_sort_last_in_both_directions() {
    let links = sample_links();

    for order in ORDERS {
        let out = view::apply(&links, &ViewQuery::new().sort_by(SortField::LastClicked, order));
        let first_null = out
            .iter()
            .position(|r| r.last_clicked.is_none())
            .expect("sample has never-clicked records");
        assert!(
            out[first_null..].iter().all(|r| r.last_clicked.is_none()),
            "{order}: clicked record after a never-clicked one"
        );
    }

    let asc = view::apply(
        &links,
        &ViewQuery::new().sort_by(SortField::LastClicked, SortOrder::Asc),
    );
    let codes: Vec<&str> = asc.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["docs01", "abc123", "Zeta99", "qwerty"]);
}

#[tokio::test]
async fn view_does_not_mutate_registry() {
    let gateway = MockLinkGateway::with_links(sample_links());
    let (registry, _events) = LinkRegistry::new(Arc::new(gateway.clone()), &ClientConfig::new());
    registry.load().await.unwrap();
    let before = registry.links().await;

    let query = ViewQuery::new()
        .search("example")
        .sort_by(SortField::Clicks, SortOrder::Desc);
    let first = registry.view(&query).await;
    let second = registry.view(&query).await;

    assert_eq!(first, second);
    assert_eq!(registry.links().await, before);
    assert_eq!(gateway.list_calls(), 1);
}
