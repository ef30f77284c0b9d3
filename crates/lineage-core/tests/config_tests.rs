use std::fs;

use lineage_core::config::{DEFAULT_LOG_JSON, DEFAULT_LOG_LEVEL, DEFAULT_STRICT};
use lineage_core::{Config, ConfigError, GraphError, LineageGraph, Rules};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.engine.strict, DEFAULT_STRICT);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.logging.json, DEFAULT_LOG_JSON);
    assert!(config.rules.all_rules().is_empty());
}

#[test]
fn test_default_config_string_parses_back() {
    let rendered = Config::default_config_string();
    let config: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_config_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("lineage.toml");
    fs::write(
        &path,
        r#"
[logging]
json = true

[[rules.primary_category]]
edge_type = "TermCategorization"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.logging.json);
    assert_eq!(config.rules.primary_category.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_config_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = Config::from_file(temp.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_rules_from_each_format() {
    let temp = TempDir::new().unwrap();

    let toml_path = temp.path().join("rules.toml");
    fs::write(
        &toml_path,
        "[[invert_edge]]\nedge_type = \"SemanticAssignment\"\n",
    )
    .unwrap();

    let yaml_path = temp.path().join("rules.yaml");
    fs::write(&yaml_path, "invert_edge:\n  - edge_type: SemanticAssignment\n").unwrap();

    let json_path = temp.path().join("rules.json");
    fs::write(&json_path, r#"{"invert_edge": [{"edge_type": "SemanticAssignment"}]}"#).unwrap();

    let from_toml = Rules::from_file(&toml_path).unwrap();
    assert_eq!(from_toml, Rules::from_file(&yaml_path).unwrap());
    assert_eq!(from_toml, Rules::from_file(&json_path).unwrap());
    assert_eq!(from_toml.len(), 1);
}

#[test]
fn test_rules_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.ini");
    fs::write(&path, "").unwrap();

    assert!(matches!(Rules::from_file(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_graph_from_yaml_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("graph.yml");
    fs::write(
        &path,
        r#"
nodes:
  - id: a
    label: A
    group: RelationalColumn
edges:
  - from: a
    to: b
    label: LineageMapping
"#,
    )
    .unwrap();

    let graph = LineageGraph::from_file(&path).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.dangling_edges().len(), 1);

    let bad = temp.path().join("graph.csv");
    fs::write(&bad, "").unwrap();
    assert!(matches!(
        LineageGraph::from_file(&bad),
        Err(GraphError::UnsupportedFormat(ext)) if ext == "csv"
    ));
}
