use std::fs;
use std::path::PathBuf;

use pk_model::{DrugRecord, DrugSource, TissueSite};
use pk_standards::{DrugStore, StoreError, StoreHandle, load_default_store, validate_database};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "pkhelper-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_bundled_database() {
    let store = load_default_store().expect("load bundled database");
    for key in ["meropenem", "vancomicina", "amicacina", "fluconazol"] {
        assert!(store.contains(key), "missing {key}");
    }
    let vanco = store.get("vancomicina").unwrap();
    assert_eq!(vanco.name, "Vancomicina");
    assert_eq!(
        vanco
            .pharmacokinetics
            .tissue_penetration
            .get(TissueSite::Lung),
        Some("Moderate")
    );
    assert_eq!(store.fingerprint().map(str::len), Some(64));
}

#[test]
fn bundled_database_validates_cleanly() {
    let report = validate_database(&pk_standards::default_database_path()).unwrap();
    assert!(report.is_valid(), "{report:?}");
    assert!(report.ok_count() > 0);
}

#[test]
fn load_reports_offending_key() {
    let dir = unique_temp_dir("bad-record");
    let path = dir.join("medicamentos.json");
    fs::write(
        &path,
        r#"{"meropenem": {"nome": "Meropenem"}, "broken": {"nome": "X", "extra": 1}}"#,
    )
    .unwrap();
    let err = DrugStore::load(&path).unwrap_err();
    match err {
        StoreError::InvalidRecord { key, .. } => assert_eq!(key, "broken"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = unique_temp_dir("missing");
    let err = DrugStore::load(&dir.join("nope.json")).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn save_then_load_preserves_records() {
    let dir = unique_temp_dir("save");
    let path = dir.join("medicamentos.json");
    let store = DrugStore::from_json_str(r#"{"Meropenem": {"nome": "Meropenem", "classe": "Carbapenem"}}"#)
        .unwrap()
        .insert("exemplo medicamento", DrugRecord::new("Exemplo"))
        .unwrap();
    store.save(&path).unwrap();

    let loaded = DrugStore::load(&path).unwrap();
    let keys: Vec<&str> = loaded.keys().collect();
    assert_eq!(keys, vec!["exemplo_medicamento", "meropenem"]);
    assert_eq!(
        loaded.get("meropenem").unwrap().class.as_deref(),
        Some("Carbapenem")
    );
}

#[test]
fn handle_reload_swaps_snapshot() {
    let dir = unique_temp_dir("reload");
    let path = dir.join("medicamentos.json");
    fs::write(&path, r#"{"amicacina": {"nome": "Amicacina"}}"#).unwrap();

    let handle = StoreHandle::new(DrugStore::default());
    let before = handle.snapshot();
    let after = handle.reload(&path).unwrap();
    assert!(before.is_empty());
    assert!(after.contains("amicacina"));
}

#[test]
fn validation_report_lines() {
    let report = pk_standards::validate_json_str(
        r#"{"amicacina": {"nome": "Amicacina"}, "no_name": {"nome": " "}}"#,
    )
    .unwrap();
    let lines: Vec<String> = report.records.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r#"
    [OK] amicacina
    [ERROR] no_name: record "no_name" has an empty name
    "#);
}
