use lineage_core::{
    Edge, GraphRule, IncompleteRule, InvertEdgeRule, LineageGraph, PrimaryCategoryRule,
    RemoveNodesRule, RuleNode,
};
use proptest::prelude::*;

const GROUPS: &[&str] = &["Asset", "Process", "Confidentiality", "RelationalColumn"];
const LABELS: &[&str] = &["LineageMapping", "ClassificationAssignment", "SemanticAssignment"];

/// Random graphs over a small id space, including dangling edges and self-loops.
fn arb_graph() -> impl Strategy<Value = LineageGraph> {
    let nodes = prop::collection::vec((0usize..8, 0..GROUPS.len()), 0..8);
    let edges = prop::collection::vec((0usize..10, 0usize..10, 0..LABELS.len()), 0..16);

    (nodes, edges).prop_map(|(nodes, edges)| {
        LineageGraph::from_parts(
            nodes
                .into_iter()
                .map(|(id, group)| RuleNode::new(format!("n{id}"), format!("node {id}"), GROUPS[group])),
            edges
                .into_iter()
                .map(|(from, to, label)| Edge::labeled(format!("n{from}"), format!("n{to}"), LABELS[label])),
        )
    })
}

proptest! {
    #[test]
    fn test_unset_incomplete_rule_never_changes_graph(graph in arb_graph()) {
        let mut graph = graph;
        let before = graph.to_data();

        let rule = IncompleteRule { edge_type: None, destination_node_type: Some("Confidentiality".into()) };
        prop_assert!(!rule.apply(&mut graph, "n0"));
        prop_assert_eq!(graph.to_data(), before);
    }

    #[test]
    fn test_unset_invert_edge_rule_never_changes_graph(graph in arb_graph(), group in 0..GROUPS.len()) {
        let mut graph = graph;
        let before = graph.to_data();

        prop_assert!(!InvertEdgeRule::default().apply(&mut graph, "n0"));
        let filtered = InvertEdgeRule {
            edge_type: None,
            source_node_type: Some(GROUPS[group].into()),
            destination_node_type: Some(GROUPS[group].into()),
        };
        prop_assert!(!filtered.apply(&mut graph, "n0"));
        prop_assert_eq!(graph.to_data(), before);
    }

    #[test]
    fn test_unset_primary_category_rule_never_changes_graph(graph in arb_graph(), group in 0..GROUPS.len()) {
        let mut graph = graph;
        let before = graph.to_data();

        prop_assert!(!PrimaryCategoryRule::default().apply(&mut graph, "n0"));
        let filtered = PrimaryCategoryRule {
            edge_type: None,
            source_node_type: None,
            destination_node_type: Some(GROUPS[group].into()),
        };
        prop_assert!(!filtered.apply(&mut graph, "n0"));
        prop_assert_eq!(graph.to_data(), before);
    }

    #[test]
    fn test_unfiltered_invert_is_an_involution(graph in arb_graph(), label in 0..LABELS.len()) {
        let mut graph = graph;
        let before = graph.to_data();
        let rule = InvertEdgeRule::new(LABELS[label]);

        rule.apply(&mut graph, "n0");
        rule.apply(&mut graph, "n0");
        prop_assert_eq!(graph.to_data(), before);
    }

    #[test]
    fn test_incomplete_is_idempotent(graph in arb_graph()) {
        let mut graph = graph;
        let rule = IncompleteRule::new("ClassificationAssignment", "Confidentiality");

        rule.apply(&mut graph, "n0");
        let after_first = graph.to_data();

        prop_assert!(!rule.apply(&mut graph, "n0"));
        prop_assert_eq!(graph.to_data(), after_first);
    }

    #[test]
    fn test_remove_nodes_leaves_no_removable_group(graph in arb_graph(), root in 0usize..8) {
        let mut graph = graph;
        let queried = format!("n{root}");
        let gate_open = graph.node_in_group(&queried, "RelationalColumn");
        let before = graph.to_data();

        let rule = RemoveNodesRule::new("RelationalColumn", ["Process"]);
        rule.apply(&mut graph, &queried);

        if gate_open {
            prop_assert!(graph.nodes().all(|(_, n)| n.group != "Process"));
            prop_assert!(graph.edges().all(|(_, e)| e.label.is_some() || e.from != e.to));
        } else {
            prop_assert_eq!(graph.to_data(), before);
        }
    }
}
