//! Graph validation against a store filled by the pipeline.

use pretty_assertions::assert_eq;
use sy_config::{GraphConfig, PipelineConfig};
use sy_core::{DataError, Value};
use sy_graph::{GraphError, GraphKind, GraphValidator, OrderBy, Scope, metrics};
use sy_pipeline::Pipeline;
use sy_store::{Store, queries};

fn store() -> Store {
    let mut store = Store::open_in_memory().unwrap();
    store
        .conn()
        .execute_batch(
            r#"
            INSERT INTO "current" VALUES ('X', 'B'), ('Y', 'MOVIMIENTO REGIONAL AYLLU');
            INSERT INTO party_record VALUES ('X', 'A', 1995, 2010), ('X', 'B', 2010, 2019);
            INSERT INTO position_record VALUES ('Y', 'ALIANZA ELECTORAL A', 2002, 2006);
            INSERT INTO resign_record VALUES ('Y', 'A', 2007);
            "#,
        )
        .unwrap();
    let sources = store.load_sources().unwrap();
    let tables = Pipeline::new(PipelineConfig::default())
        .run(&sources)
        .unwrap();
    store.write_canonical(&tables).unwrap();
    store
}

fn data_error(err: GraphError) -> DataError {
    err.data().cloned().unwrap()
}

#[test]
fn whole_network_passes_every_stage() {
    let store = store();
    let config = GraphConfig::default();
    let network = GraphValidator::new(&store, &config)
        .build(
            queries::ALL_NETWORK,
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap();

    assert_eq!(network.graph.node_count(), 3);
    assert_eq!(network.graph.edge_count(), 2);
    assert_eq!(network.edges.len(), 2);
    assert_eq!(network.nodes.len(), 3);

    let graph = network.graph.as_directed().unwrap();
    let ayllu = graph.node(&Value::from(2)).unwrap();
    assert_eq!(ayllu.label(), Some("MR/D AYLLU"));
}

#[test]
fn undirected_build_uses_the_same_checks() {
    let store = store();
    let config = GraphConfig::default();
    let network = GraphValidator::new(&store, &config)
        .build(
            queries::ALL_NETWORK,
            queries::ALL_NODES,
            GraphKind::Undirected,
            Scope::Whole,
        )
        .unwrap();
    assert_eq!(network.graph.kind(), GraphKind::Undirected);
    assert!(network.graph.as_directed().is_none());
}

#[test]
fn missing_key_columns_fail_the_schema_stage() {
    let store = store();
    let config = GraphConfig::default();
    let err = GraphValidator::new(&store, &config)
        .build(
            "SELECT source, target FROM network",
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap_err();
    assert_eq!(
        data_error(err),
        DataError::SchemaMismatch {
            table: "edges query".into(),
            missing: vec!["id_hdv".into(), "year".into()],
        }
    );
}

#[test]
fn repeated_rows_fail_the_uniqueness_stage() {
    let store = store();
    let config = GraphConfig::default();
    let err = GraphValidator::new(&store, &config)
        .build(
            "SELECT * FROM network UNION ALL SELECT * FROM network",
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap_err();
    assert!(matches!(
        data_error(err),
        DataError::DuplicateRows { table, .. } if table == "edges query"
    ));
}

#[test]
fn fabricated_rows_fail_the_provenance_stage() {
    let store = store();
    let config = GraphConfig::default();
    let err = GraphValidator::new(&store, &config)
        .build(
            r#"SELECT id_hdv, source, target, "year" + 1 AS "year", edge FROM network"#,
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap_err();
    assert!(matches!(
        data_error(err),
        DataError::ErroneousValues { count: 2, .. }
    ));
}

#[test]
fn partial_node_query_fails_integrity_for_whole_graphs() {
    let store = store();
    let config = GraphConfig::default();
    let validator = GraphValidator::new(&store, &config);
    let partial_nodes = "SELECT * FROM nodes WHERE node < 2";

    let err = validator
        .build(
            queries::ALL_NETWORK,
            partial_nodes,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap_err();
    assert_eq!(
        data_error(err),
        DataError::NodeEdgeMismatch {
            table: "edges query".into(),
            only_in_edges: vec!["2".into()],
            only_in_nodes: vec![],
        }
    );

    let subgraph = validator
        .build(
            queries::ALL_NETWORK,
            partial_nodes,
            GraphKind::Directed,
            Scope::Subgraph,
        )
        .unwrap();
    assert_eq!(subgraph.graph.node_count(), 3);
}

#[test]
fn party_subgraph_holds_neighbours_only() {
    let store = store();
    let config = GraphConfig::default();
    let network = GraphValidator::new(&store, &config)
        .party(2, GraphKind::Directed)
        .unwrap();
    assert_eq!(network.edges.len(), 1);
    assert_eq!(network.graph.node_count(), 2);
}

#[test]
fn party_without_edges_is_unknown() {
    let store = store();
    let config = GraphConfig::default();
    let err = GraphValidator::new(&store, &config)
        .party(9, GraphKind::Directed)
        .unwrap_err();
    assert!(matches!(err, GraphError::UnknownNode(node) if node == "9"));
}

#[test]
fn aggregate_graph_needs_the_unchecked_path() {
    let store = store();
    let config = GraphConfig::default();
    let validator = GraphValidator::new(&store, &config);

    let err = validator
        .build(
            queries::MOVEMENT_TYPE_EDGES,
            queries::MOVEMENT_TYPE_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap_err();
    assert!(matches!(
        data_error(err),
        DataError::SchemaMismatch { .. }
    ));

    let network = validator
        .build_unchecked(
            queries::MOVEMENT_TYPE_EDGES,
            queries::MOVEMENT_TYPE_NODES,
            GraphKind::Directed,
        )
        .unwrap();
    assert_eq!(network.graph.node_count(), 2);
    assert_eq!(network.graph.edge_count(), 2);
}

#[test]
fn edge_query_can_be_validated_alone() {
    let store = store();
    let config = GraphConfig::default();
    let validator = GraphValidator::new(&store, &config);

    let edges = validator
        .edges_only("SELECT * FROM network WHERE id_hdv = 'X'")
        .unwrap();
    assert_eq!(edges.len(), 1);

    let err = validator
        .edges_only(r#"SELECT id_hdv, target AS source, source AS target, "year" FROM network"#)
        .unwrap_err();
    assert!(matches!(
        data_error(err),
        DataError::ErroneousValues { count: 2, .. }
    ));
}

#[test]
fn unexecutable_query_is_a_store_error() {
    let store = store();
    let config = GraphConfig::default();
    let err = GraphValidator::new(&store, &config)
        .edges_only("SELECT * FROM no_such_table")
        .unwrap_err();
    assert!(matches!(err, GraphError::Store(_)));
    assert!(err.data().is_none());
}

#[test]
fn metrics_rank_the_validated_network() {
    let store = store();
    let config = GraphConfig::default();
    let network = GraphValidator::new(&store, &config)
        .build(
            queries::ALL_NETWORK,
            queries::ALL_NODES,
            GraphKind::Directed,
            Scope::Whole,
        )
        .unwrap();
    let graph = network.graph.as_directed().unwrap();

    let summary = metrics::summary(graph);
    assert_eq!(summary.node_count, 3);
    assert_eq!(summary.components, 1);

    let ranked = metrics::rank(&metrics::node_metrics(graph), OrderBy::OutDegree, 1);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].key, Value::from(0));
    assert_eq!(ranked[0].label.as_deref(), Some("A"));
    assert_eq!(ranked[0].out_degree, 2);
}
