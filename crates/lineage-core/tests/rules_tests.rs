use lineage_core::rules::{INCOMPLETE_MARKER, TYPE_PROPERTY};
use lineage_core::{
    Edge, GraphData, GraphRule, IncompleteRule, InvertEdgeRule, LineageGraph, RemoveNodesRule,
    Rule, RuleNode, Rules,
};

fn classified_asset() -> LineageGraph {
    LineageGraph::from_parts(
        [
            RuleNode::new("A", "customers", "Asset"),
            RuleNode::new("C", "Confidential", "Confidentiality"),
        ],
        [Edge::labeled("A", "C", "ClassificationAssignment")],
    )
}

fn column_chain() -> LineageGraph {
    LineageGraph::from_parts(
        [
            RuleNode::new("A", "src.id", "RelationalColumn"),
            RuleNode::new("B", "load_job", "Process"),
            RuleNode::new("C", "dst.id", "RelationalColumn"),
        ],
        [
            Edge::labeled("A", "B", "LineageMapping"),
            Edge::labeled("B", "C", "LineageMapping"),
        ],
    )
}

#[test]
fn test_incomplete_without_edge_type_is_noop() {
    let mut graph = classified_asset();
    let before = graph.to_data();

    let rule = IncompleteRule {
        edge_type: None,
        destination_node_type: Some("Confidentiality".into()),
    };
    assert!(!rule.apply(&mut graph, "A"));

    assert_eq!(graph.to_data(), before);
}

#[test]
fn test_incomplete_collapses_classification() {
    let mut graph = classified_asset();
    let rule = IncompleteRule::new("ClassificationAssignment", "Confidentiality");

    assert!(rule.apply(&mut graph, "A"));

    assert!(!graph.contains_node("C"));
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(
        graph.node_by_id("A").unwrap().property(TYPE_PROPERTY),
        Some(INCOMPLETE_MARKER)
    );
}

#[test]
fn test_incomplete_second_pass_is_noop() {
    let mut graph = classified_asset();
    let rule = IncompleteRule::new("ClassificationAssignment", "Confidentiality");

    rule.apply(&mut graph, "A");
    let after_first = graph.to_data();

    assert!(!rule.apply(&mut graph, "A"));
    assert_eq!(graph.to_data(), after_first);
}

#[test]
fn test_invert_edge_only_touches_matching_label() {
    let mut graph = column_chain();
    graph.add_edge(Edge::labeled("A", "C", "SemanticAssignment"));

    let rule = InvertEdgeRule::new("SemanticAssignment");
    assert!(rule.apply(&mut graph, "A"));

    let data = graph.to_data();
    assert_eq!((data.edges[0].from.as_str(), data.edges[0].to.as_str()), ("A", "B"));
    assert_eq!((data.edges[1].from.as_str(), data.edges[1].to.as_str()), ("B", "C"));
    assert_eq!((data.edges[2].from.as_str(), data.edges[2].to.as_str()), ("C", "A"));
}

#[test]
fn test_invert_edge_twice_restores_direction() {
    let mut graph = column_chain();
    let original = graph.to_data();
    let rule = InvertEdgeRule::new("LineageMapping");

    rule.apply(&mut graph, "A");
    assert_ne!(graph.to_data(), original);

    rule.apply(&mut graph, "A");
    assert_eq!(graph.to_data(), original);
}

#[test]
fn test_remove_nodes_gate_not_met() {
    let mut graph = column_chain();
    let before = graph.to_data();

    let rule = RemoveNodesRule::new("GlossaryTerm", ["Process"]);
    assert!(!rule.apply(&mut graph, "A"));
    assert_eq!(graph.to_data(), before);

    // Queried id unknown to the graph.
    let rule = RemoveNodesRule::new("RelationalColumn", ["Process"]);
    assert!(!rule.apply(&mut graph, "missing"));
    assert_eq!(graph.to_data(), before);
}

#[test]
fn test_remove_nodes_splices_chain() {
    let mut graph = column_chain();
    let nodes_before = graph.node_count();
    let edges_before = graph.edge_count();

    let rule = RemoveNodesRule::new("RelationalColumn", ["Process"]);
    assert!(rule.apply(&mut graph, "A"));

    assert!(!graph.contains_node("B"));
    assert_eq!(graph.node_count(), nodes_before - 1);
    // A->B and B->C are replaced by a single bridge.
    assert_eq!(graph.edge_count(), edges_before - 1);

    let data = graph.to_data();
    assert_eq!(data.edges, vec![Edge::new("A", "C")]);
    assert!(data.edges[0].label.is_none());
}

#[test]
fn test_all_rules_with_only_invert_edge() {
    let rules = Rules {
        invert_edge: Some(vec![
            InvertEdgeRule::new("LineageMapping"),
            InvertEdgeRule::new("SemanticAssignment").with_source_node_type("GlossaryTerm"),
        ]),
        ..Rules::default()
    };

    let all = rules.all_rules();
    assert_eq!(
        all,
        vec![
            Rule::InvertEdge(InvertEdgeRule::new("LineageMapping")),
            Rule::InvertEdge(
                InvertEdgeRule::new("SemanticAssignment").with_source_node_type("GlossaryTerm")
            ),
        ]
    );
}

#[test]
fn test_apply_all_runs_removal_last() {
    // The invert rule filters on Process, so it must run before Process nodes are spliced.
    let rules = Rules::new()
        .with_remove_nodes(RemoveNodesRule::new("RelationalColumn", ["Process"]))
        .with_invert_edge(InvertEdgeRule::new("LineageMapping").with_source_node_type("Process"));

    let mut graph = column_chain();
    assert_eq!(rules.apply_all(&mut graph, "A"), 2);

    // B -> C was flipped to C -> B, so B had two predecessors and no successors.
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_graph_json_round_trip_keeps_wire_names() {
    let json = r#"{
        "nodes": [
            {"id": "A", "label": "a", "group": "Asset", "qualifiedName": "db.a"},
            {"id": "C", "label": "c", "group": "Confidentiality"}
        ],
        "edges": [
            {"from": "A", "to": "C", "label": "ClassificationAssignment", "type": "classification"}
        ]
    }"#;

    let mut graph: LineageGraph = serde_json::from_str(json).unwrap();
    IncompleteRule::new("ClassificationAssignment", "Confidentiality").apply(&mut graph, "A");

    let out: GraphData = serde_json::from_value(serde_json::to_value(&graph).unwrap()).unwrap();
    assert_eq!(out.nodes.len(), 1);
    assert_eq!(out.nodes[0].qualified_name.as_deref(), Some("db.a"));
    assert!(out.edges.is_empty());
}
