// ==========================================
// 制造执行系统 - 工艺目录命令行入口
// ==========================================
// 用法:
//   mes-catalog [配置文件(.json/.db)] [--operations 工序表.csv] [--save-db 目标.db]
// 配置来源优先级: 命令行参数 > MES_CATALOG_CONFIG > 内置种子
// 输出: 每个产品的完整路线 (JSON, stdout)
// ==========================================

use anyhow::{bail, Context, Result};
use mes_process_catalog::config::{build_catalog, config_path_from_env, default_config, CatalogConfig};
use mes_process_catalog::importer::{apply_operation_csv, load_config_from_json};
use mes_process_catalog::repository::CatalogRepository;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    operations_csv: Option<String>,
    save_db: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--operations" => {
                args.operations_csv = Some(iter.next().context("--operations 缺少文件路径")?);
            }
            "--save-db" => {
                args.save_db = Some(iter.next().context("--save-db 缺少文件路径")?);
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => {
                if args.config_path.is_some() {
                    bail!("只能指定一个配置文件: {}", other);
                }
                args.config_path = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn load_config(path: Option<String>) -> Result<CatalogConfig> {
    let path = match path.or_else(config_path_from_env) {
        Some(p) => p,
        None => {
            tracing::info!("未指定配置文件,使用内置种子数据");
            return Ok(default_config());
        }
    };

    let is_db = Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "db" | "sqlite" | "sqlite3"))
        .unwrap_or(false);

    if is_db {
        let repo = CatalogRepository::new(&path).with_context(|| format!("无法打开数据库: {}", path))?;
        Ok(repo.load_config()?)
    } else {
        Ok(load_config_from_json(Path::new(&path))?)
    }
}

fn main() -> Result<()> {
    mes_process_catalog::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", mes_process_catalog::APP_NAME);
    tracing::info!("系统版本: {}", mes_process_catalog::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;
    let mut config = load_config(args.config_path)?;

    if let Some(csv_path) = &args.operations_csv {
        let file = File::open(csv_path).with_context(|| format!("无法打开工序表: {}", csv_path))?;
        let replaced = apply_operation_csv(&mut config, file)?;
        tracing::info!(replaced, "已按工序表替换产品工序");
    }

    // 校验失败视为启动期致命错误
    let catalog = build_catalog(&config).context("工艺目录构建失败")?;

    if let Some(db_path) = &args.save_db {
        let repo = CatalogRepository::new(db_path).with_context(|| format!("无法打开数据库: {}", db_path))?;
        repo.save_config(&config)?;
    }

    let routes = catalog
        .products()
        .iter()
        .map(|p| catalog.route(&p.sku))
        .collect::<Result<Vec<_>, _>>()?;

    println!("{}", serde_json::to_string_pretty(&routes)?);
    Ok(())
}
