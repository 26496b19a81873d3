// ==========================================
// 制造执行系统 - 种子文件解析
// ==========================================
// 支持: JSON 目录配置 (.json) / CSV 工序表 (.csv)
// CSV 表头: sku,template_id,name,code,operation_type,sequence
// ==========================================

use crate::catalog::CatalogError;
use crate::config::CatalogConfig;
use crate::domain::OperationSpec;
use crate::importer::error::{SeedError, SeedResult};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn check_file(path: &Path, expected_ext: &str) -> SeedResult<()> {
    if !path.exists() {
        return Err(SeedError::FileNotFound(path.display().to_string()));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case(expected_ext) {
        return Err(SeedError::UnsupportedFormat(ext.to_string()));
    }
    Ok(())
}

// ==========================================
// JSON 目录配置
// ==========================================

/// 从 JSON 文件读取目录配置
pub fn load_config_from_json(path: &Path) -> SeedResult<CatalogConfig> {
    check_file(path, "json")?;

    let file = File::open(path)?;
    let config: CatalogConfig = serde_json::from_reader(file)?;

    tracing::info!(
        path = %path.display(),
        processes = config.processes.len(),
        products = config.products.len(),
        "目录配置已读取"
    );
    Ok(config)
}

// ==========================================
// CSV 工序表
// ==========================================

/// 解析 CSV 工序表
///
/// # 返回
/// SKU → 工序列表 (保持行顺序)
pub fn parse_operations_csv<R: Read>(source: R) -> SeedResult<BTreeMap<String, Vec<OperationSpec>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut operations: BTreeMap<String, Vec<OperationSpec>> = BTreeMap::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // 表头占第 1 行
        let row = row_idx + 2;

        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.as_str(), value.trim());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        let sku = required(&row_map, row, &["sku"])?;
        let spec = OperationSpec {
            template_id: parse_number(&row_map, row, "template_id")?,
            name: required(&row_map, row, &["name"])?.to_string(),
            code: required(&row_map, row, &["code"])?.to_string(),
            operation_type: required(&row_map, row, &["operation_type", "type"])?.to_string(),
            sequence: parse_number(&row_map, row, "sequence")?,
        };

        operations.entry(sku.to_string()).or_default().push(spec);
    }

    Ok(operations)
}

/// 从 CSV 文件解析工序表
pub fn load_operations_from_csv(path: &Path) -> SeedResult<BTreeMap<String, Vec<OperationSpec>>> {
    check_file(path, "csv")?;
    let file = File::open(path)?;
    parse_operations_csv(file)
}

/// 将 CSV 工序表合并进配置 (按 SKU 整体替换工序列表)
///
/// 含未登记 SKU 时返回错误,配置不做任何修改
///
/// # 返回
/// 被替换的产品数量
pub fn apply_operation_csv<R: Read>(config: &mut CatalogConfig, source: R) -> SeedResult<usize> {
    let operations = parse_operations_csv(source)?;

    // 先整体校验,任一 SKU 未知则配置保持不变
    if let Some(sku) = operations.keys().find(|sku| config.product(sku).is_none()) {
        return Err(CatalogError::UnknownProduct(sku.clone()).into());
    }

    let mut replaced = 0;
    for (sku, specs) in operations {
        if let Some(product) = config.product_mut(&sku) {
            product.operations = specs;
            replaced += 1;
        }
    }

    tracing::debug!(replaced, "CSV 工序表已合并");
    Ok(replaced)
}

fn required<'a>(row: &HashMap<&str, &'a str>, row_no: usize, keys: &[&str]) -> SeedResult<&'a str> {
    keys.iter()
        .filter_map(|k| row.get(k).copied())
        .find(|v| !v.is_empty())
        .ok_or_else(|| SeedError::MissingField {
            row: row_no,
            field: keys[0].to_string(),
        })
}

fn parse_number(row: &HashMap<&str, &str>, row_no: usize, key: &str) -> SeedResult<u32> {
    let raw = required(row, row_no, &[key])?;
    raw.parse::<u32>().map_err(|_| SeedError::TypeConversionError {
        row: row_no,
        field: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    const CSV: &str = "\
sku,template_id,name,code,operation_type,sequence
REBAR-10MM,1,Scrap Charging,SCR,FURNACE,1
REBAR-10MM,15,Bar Rolling Mill,BRM,ROLLING,2

BILLET-150, 5 ,Billet Casting,BCC,CASTER,1
";

    #[test]
    fn test_parse_groups_rows_by_sku() {
        let parsed = parse_operations_csv(CSV.as_bytes()).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["REBAR-10MM"].len(), 2);
        assert_eq!(parsed["REBAR-10MM"][1].code, "BRM");
        assert_eq!(parsed["BILLET-150"][0].template_id, 5);
    }

    #[test]
    fn test_parse_reports_bad_number_with_row() {
        let csv = "sku,template_id,name,code,operation_type,sequence\nX,abc,N,C,ROLLING,1\n";
        let err = parse_operations_csv(csv.as_bytes()).unwrap_err();

        match err {
            SeedError::TypeConversionError { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "template_id");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_reports_missing_field() {
        let csv = "sku,template_id,name,code,sequence\nX,1,N,C,1\n";
        assert!(matches!(
            parse_operations_csv(csv.as_bytes()),
            Err(SeedError::MissingField { row: 2, .. })
        ));
    }

    #[test]
    fn test_apply_replaces_product_operations() {
        let mut config = default_config();
        let replaced = apply_operation_csv(&mut config, CSV.as_bytes()).unwrap();

        assert_eq!(replaced, 2);
        assert_eq!(config.product("REBAR-10MM").unwrap().operations.len(), 2);
        assert_eq!(config.product("BILLET-150").unwrap().operations.len(), 1);
    }

    #[test]
    fn test_apply_rejects_unknown_sku() {
        let mut config = default_config();
        let csv = "sku,template_id,name,code,operation_type,sequence\nGHOST,1,N,C,ROLLING,1\n";

        assert!(matches!(
            apply_operation_csv(&mut config, csv.as_bytes()),
            Err(SeedError::Catalog(CatalogError::UnknownProduct(_)))
        ));
    }

    #[test]
    fn test_apply_with_unknown_sku_leaves_config_untouched() {
        let mut config = default_config();
        // BILLET-150 排在 GHOST 之前
        let csv = "sku,template_id,name,code,operation_type,sequence\n\
                   BILLET-150,5,Billet Casting,BCC,CASTER,1\n\
                   GHOST,1,N,C,ROLLING,1\n";

        let err = apply_operation_csv(&mut config, csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SeedError::Catalog(CatalogError::UnknownProduct(ref sku)) if sku == "GHOST"
        ));
        assert_eq!(config.product("BILLET-150").unwrap().operations.len(), 5);
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_config_from_json(Path::new("/nonexistent/catalog.json")),
            Err(SeedError::FileNotFound(_))
        ));
    }
}
