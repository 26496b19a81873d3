// ==========================================
// 种子数据来源集成测试
// ==========================================
// 测试目标: JSON 文件 / CSV 工序表 / SQLite 行集 → 目录
// ==========================================


use mes_process_catalog::catalog::CatalogError;
use mes_process_catalog::config::{build_catalog, default_config, CatalogConfig};
use mes_process_catalog::db::{open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use mes_process_catalog::importer::{
    apply_operation_csv, load_config_from_json, load_operations_from_csv, SeedError,
};
use mes_process_catalog::repository::CatalogRepository;
use std::fs;
use std::path::Path;
use test_helpers::*;

#[test]
fn test_json_file_round_trip_builds_same_catalog() {
    let (_file, path) = temp_path(".json").expect("Failed to create temp file");
    let config = default_config();
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = load_config_from_json(Path::new(&path)).expect("Failed to load config");
    assert_eq!(loaded, config);

    let catalog = build_catalog(&loaded).unwrap();
    assert_eq!(catalog.lookup(HR_COIL).unwrap().len(), 8);
}

#[test]
fn test_json_with_wrong_extension_rejected() {
    let (_file, path) = temp_path(".yaml").expect("Failed to create temp file");
    assert!(matches!(
        load_config_from_json(Path::new(&path)),
        Err(SeedError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_invalid_json_reported() {
    let (_file, path) = temp_path(".json").expect("Failed to create temp file");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        load_config_from_json(Path::new(&path)),
        Err(SeedError::JsonParseError(_))
    ));
}

#[test]
fn test_csv_with_gap_fails_at_build_time() {
    let (_file, path) = temp_path(".csv").expect("Failed to create temp file");
    fs::write(
        &path,
        "sku,template_id,name,code,operation_type,sequence\n\
         BILLET-150,1,Scrap Charging,SCR,FURNACE,1\n\
         BILLET-150,5,Billet Casting,BCC,CASTER,3\n",
    )
    .unwrap();

    let parsed = load_operations_from_csv(Path::new(&path)).unwrap();
    assert_eq!(parsed["BILLET-150"].len(), 2);

    let mut config = default_config();
    apply_operation_csv(&mut config, fs::File::open(&path).unwrap()).unwrap();

    assert!(matches!(
        build_catalog(&config),
        Err(CatalogError::InvalidSequence { ref sku, .. }) if sku == "BILLET-150"
    ));
}

#[test]
fn test_sqlite_round_trip() {
    let (_file, path) = temp_path(".db").expect("Failed to create temp db");
    let config = default_config();

    {
        let repo = CatalogRepository::new(&path).expect("Failed to open repository");
        repo.save_config(&config).unwrap();
    }

    let repo = CatalogRepository::new(&path).expect("Failed to reopen repository");
    let loaded = repo.load_config().unwrap();

    assert_eq!(loaded.processes, config.processes);
    assert_eq!(loaded.customers.len(), config.customers.len());

    let catalog = build_catalog(&loaded).unwrap();
    let original = build_catalog(&config).unwrap();
    for product in original.products() {
        assert_eq!(
            catalog.lookup(&product.sku).unwrap(),
            original.lookup(&product.sku).unwrap()
        );
    }
}

#[test]
fn test_exported_catalog_can_be_persisted() {
    let (_file, path) = temp_path(".db").expect("Failed to create temp db");
    let catalog = defined_hot_rolling_fixture();

    let repo = CatalogRepository::new(&path).unwrap();
    repo.save_config(&CatalogConfig::from_catalog(&catalog)).unwrap();

    let rebuilt = build_catalog(&repo.load_config().unwrap()).unwrap();
    assert_eq!(rebuilt.lookup(HR_COIL).unwrap(), catalog.lookup(HR_COIL).unwrap());
}

#[test]
fn test_new_database_records_current_schema_version() {
    let (_file, path) = temp_path(".db").expect("Failed to create temp db");
    CatalogRepository::new(&path).unwrap();

    let conn = open_sqlite_connection(&path).unwrap();
    assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
}

#[test]
fn test_schema_version_mismatch_still_opens() {
    let (_file, path) = temp_path(".db").expect("Failed to create temp db");
    {
        let repo = CatalogRepository::new(&path).unwrap();
        repo.save_config(&default_config()).unwrap();
    }
    {
        let conn = open_sqlite_connection(&path).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [99i64])
            .unwrap();
    }

    let repo = CatalogRepository::new(&path).expect("version mismatch must only warn");
    assert_eq!(repo.load_config().unwrap().products.len(), 6);
}
