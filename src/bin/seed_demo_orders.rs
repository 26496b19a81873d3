// ==========================================
// 制造执行系统 - 演示订单生成
// ==========================================
// 用法: seed_demo_orders [订单数量, 默认 20, 上限 1000]
// 输出: 演示生产订单 (JSON, stdout),供后端种子导入
// ==========================================

use anyhow::{Context, Result};
use chrono::Utc;
use mes_process_catalog::config::{build_catalog, default_config};
use mes_process_catalog::OrderGenerator;
use std::sync::Arc;

const DEFAULT_ORDER_COUNT: usize = 20;

fn main() -> Result<()> {
    mes_process_catalog::logging::init();

    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ORDER_COUNT);

    let config = default_config();
    let catalog = build_catalog(&config).context("工艺目录构建失败")?;

    let generator = OrderGenerator::new(Arc::new(catalog));
    let orders = generator.generate_demo_orders(&config.customers, count, Utc::now())?;

    tracing::info!(
        orders = orders.len(),
        operations = orders.iter().map(|o| o.operation_count()).sum::<usize>(),
        "演示订单生成完成"
    );

    println!("{}", serde_json::to_string_pretty(&orders)?);
    Ok(())
}
