//! # Property-Based Tests
//!
//! Invariant verification for the correspondence graph using proptest.

use arcana_core::{Graph, Node, NodeId};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Build a graph of `count` number nodes with the given undirected links.
/// Link endpoints are taken modulo `count` so every link is valid.
fn build(count: u8, links: &[(u8, u8)]) -> (Graph, Vec<NodeId>) {
    let count = count.max(2);
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = (0..count)
        .map(|n| graph.add_node(Node::number(i64::from(n))))
        .collect();
    for &(a, b) in links {
        let a = &ids[usize::from(a % count)];
        let b = &ids[usize::from(b % count)];
        graph.link(a, b).expect("endpoints exist");
    }
    (graph, ids)
}

fn related_ids(graph: &Graph, id: &NodeId) -> Vec<NodeId> {
    graph.related(id).iter().map(|n| n.id.clone()).collect()
}

fn walk_ids(graph: &Graph, id: &NodeId, depth: usize) -> BTreeSet<NodeId> {
    graph.walk(id, depth).iter().map(|n| n.id.clone()).collect()
}

proptest! {
    /// After any sequence of links, adjacency is symmetric.
    #[test]
    fn link_is_always_symmetric(
        count in 2u8..20,
        links in vec((0u8..20, 0u8..20), 0..60)
    ) {
        let (graph, ids) = build(count, &links);

        for a in &ids {
            for b in &related_ids(&graph, a) {
                if b == a {
                    continue;
                }
                prop_assert!(
                    related_ids(&graph, b).contains(a),
                    "{b} is adjacent to {a} but not vice versa"
                );
            }
        }
    }

    /// Removing a node leaves no dangling adjacency anywhere.
    #[test]
    fn removal_leaves_no_dangling_adjacency(
        count in 2u8..20,
        links in vec((0u8..20, 0u8..20), 0..60),
        victim in 0u8..20
    ) {
        let (mut graph, ids) = build(count, &links);
        let victim = ids[usize::from(victim % count.max(2))].clone();

        graph.remove_node(&victim);

        prop_assert!(graph.node(&victim).is_none());
        for id in &ids {
            prop_assert!(!related_ids(&graph, id).contains(&victim));
        }
    }

    /// A zero-depth walk is always empty.
    #[test]
    fn zero_depth_walk_is_empty(
        count in 2u8..20,
        links in vec((0u8..20, 0u8..20), 0..60),
        start in 0u8..20
    ) {
        let (graph, ids) = build(count, &links);
        let start = &ids[usize::from(start % count.max(2))];

        prop_assert!(graph.walk(start, 0).is_empty());
    }

    /// Walk results grow monotonically with depth.
    #[test]
    fn walk_is_monotonic_in_depth(
        count in 2u8..20,
        links in vec((0u8..20, 0u8..20), 0..60),
        start in 0u8..20,
        depth in 0usize..6
    ) {
        let (graph, ids) = build(count, &links);
        let start = &ids[usize::from(start % count.max(2))];

        let shallow = walk_ids(&graph, start, depth);
        let deep = walk_ids(&graph, start, depth.saturating_add(1));
        prop_assert!(shallow.is_subset(&deep));
    }

    /// Correspond never overwrites an existing target's data.
    #[test]
    fn correspond_preserves_first_payload(
        first in 1i64..1000,
        second in 1i64..1000
    ) {
        let mut graph = Graph::new();
        let source = graph.add_node(Node::number(0));

        graph.correspond(&source, Node::letter('X', first)).expect("first");
        graph.correspond(&source, Node::letter('X', second)).expect("second");

        let stored = graph
            .node(&NodeId::letter('X'))
            .and_then(|n| n.payload.clone());
        prop_assert_eq!(
            stored,
            Some(arcana_core::Payload::Letter { glyph: 'X', value: first })
        );
    }

    /// Unknown-id reads are safe across the whole read surface.
    #[test]
    fn unknown_id_reads_return_empty(value in 1000i64..2000, depth in 0usize..6) {
        let graph = Graph::new();
        let ghost = NodeId::number(value);

        prop_assert!(graph.related(&ghost).is_empty());
        prop_assert!(graph.related_kinds(&ghost).is_empty());
        prop_assert!(graph.walk(&ghost, depth).is_empty());
    }
}
