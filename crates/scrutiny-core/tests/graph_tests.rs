//! Property tests for graph model construction.

use std::collections::HashSet;

use proptest::prelude::*;
use scrutiny_core::{GraphModel, PageState};

fn arb_graph() -> impl Strategy<Value = Vec<(PageState, Vec<PageState>)>> {
    let name = prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]);
    prop::collection::vec(
        (name.clone(), prop::collection::vec(name, 0..5)),
        0..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(s, succ)| {
                (
                    PageState::new(s),
                    succ.into_iter().map(PageState::new).collect(),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_name_appears_exactly_once(entries in arb_graph()) {
        let model = GraphModel::build(&entries);
        let nodes: Vec<&str> = model.nodes().collect();
        let distinct: HashSet<&str> = nodes.iter().copied().collect();
        prop_assert_eq!(nodes.len(), distinct.len());

        let mentioned: HashSet<&str> = entries
            .iter()
            .flat_map(|(s, succ)| {
                std::iter::once(s.name.as_str()).chain(succ.iter().map(|p| p.name.as_str()))
            })
            .collect();
        prop_assert_eq!(distinct, mentioned);
    }

    #[test]
    fn one_edge_per_successor_occurrence(entries in arb_graph()) {
        let model = GraphModel::build(&entries);
        let expected: Vec<(String, String)> = entries
            .iter()
            .flat_map(|(s, succ)| succ.iter().map(move |t| (s.name.clone(), t.name.clone())))
            .collect();
        prop_assert_eq!(model.edges(), expected.as_slice());

        let total: usize = model.distinct_edges().iter().map(|(_, _, n)| n).sum();
        prop_assert_eq!(total, model.edge_count());
    }
}

#[test]
fn repeated_successors_across_sources() {
    let entries = vec![
        (PageState::new("Home"), vec![PageState::new("Cart"), PageState::new("Login")]),
        (PageState::new("Login"), vec![PageState::new("Cart"), PageState::new("Home")]),
        (PageState::new("Cart"), vec![PageState::new("Home")]),
    ];
    let model = GraphModel::build(&entries);
    assert_eq!(model.nodes().collect::<Vec<_>>(), vec!["Home", "Login", "Cart"]);
    assert_eq!(model.edge_count(), 5);
    assert_eq!(model.edge_multiplicity("Login", "Cart"), 1);
}
