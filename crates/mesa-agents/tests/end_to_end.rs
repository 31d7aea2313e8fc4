//! End-to-end: a CSV file becomes a queryable table.

use std::io::Write;
use std::sync::Arc;

use mesa_core::{FieldValue, ModelConfig};
use mesa_extractors::ExtractionPipeline;
use mesa_llm::ClassifierRegistry;
use mesa_store::SchemaStore;

use mesa_agents::{IngestReport, IntegrationAgent};

fn offline_defaults() -> ModelConfig {
    ModelConfig {
        model: String::new(),
        api_token: Some("test-token".to_string()),
        base_url: None,
    }
}

#[tokio::test]
async fn csv_file_round_trips_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("sample.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b").unwrap();
    writeln!(file, "1,x").unwrap();
    writeln!(file, "2,y").unwrap();

    let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
    let agent = IntegrationAgent::new(
        ExtractionPipeline::with_defaults(),
        ClassifierRegistry::new(offline_defaults()),
        store.clone(),
        "distilbert-base-uncased",
    );

    let report = agent
        .process_file("mi_base", &csv_path, None)
        .await
        .unwrap();
    assert_eq!(
        report,
        IngestReport::Stored {
            database: "mi_base".to_string(),
            table: "sample".to_string(),
            rows: 2,
        }
    );

    // Schema is the identity column plus the seed record's keys
    let columns = store.table_schema("mi_base", "sample").unwrap();
    assert_eq!(columns, vec!["id", "a", "b"]);

    // Both rows come back with their original field values intact
    let outcome = store.query("mi_base", "sample", &[]).unwrap();
    let rows = outcome.rows().expect("two rows were persisted");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("a"), Some(&FieldValue::Text("1".into())));
    assert_eq!(rows[0].get("b"), Some(&FieldValue::Text("x".into())));
    assert_eq!(rows[1].get("a"), Some(&FieldValue::Text("2".into())));
    assert_eq!(rows[1].get("b"), Some(&FieldValue::Text("y".into())));

    // The database file landed under the configured directory
    assert!(dir.path().join("databases").join("mi_base.db").exists());
}

#[tokio::test]
async fn workflow_link_joins_two_ingested_tables() {
    let dir = tempfile::tempdir().unwrap();

    for (name, header, row) in [
        ("clientes.csv", "nombre", "ana"),
        ("pedidos.csv", "producto", "cafe"),
    ] {
        let mut file = std::fs::File::create(dir.path().join(name)).unwrap();
        writeln!(file, "{}", header).unwrap();
        writeln!(file, "{}", row).unwrap();
    }

    let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
    let agent = IntegrationAgent::new(
        ExtractionPipeline::with_defaults(),
        ClassifierRegistry::new(offline_defaults()),
        store.clone(),
        "distilbert-base-uncased",
    );

    agent
        .process_file("mi_base", &dir.path().join("clientes.csv"), None)
        .await
        .unwrap();
    agent
        .process_file("mi_base", &dir.path().join("pedidos.csv"), None)
        .await
        .unwrap();

    agent
        .define_workflow("mi_base", "clientes", "pedidos", "cliente_id")
        .unwrap();

    let columns = store.table_schema("mi_base", "pedidos").unwrap();
    assert_eq!(columns, vec!["id", "producto", "cliente_id"]);
}
