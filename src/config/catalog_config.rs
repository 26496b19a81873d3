// ==========================================
// 制造执行系统 - 目录配置
// ==========================================
// 职责: 目录初始内容的显式配置结构 + 目录构建函数
// 来源: 内置种子 / JSON 文件 / CSV 工序表 / SQLite 行集
// ==========================================

use crate::catalog::{CatalogResult, ProcessCatalog};
use crate::domain::{Customer, OperationSpec, ProcessId};
use serde::{Deserialize, Serialize};

/// 工艺路线配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(alias = "processId", alias = "id")]
    pub process_id: ProcessId,
    pub name: String,
}

/// 产品配置 (含工序列表)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub sku: String,
    pub name: String,
    #[serde(alias = "processId")]
    pub process_id: ProcessId,
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

// ==========================================
// CatalogConfig - 目录配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub processes: Vec<ProcessConfig>,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
    /// 演示客户 (订单生成使用)
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl CatalogConfig {
    pub fn product(&self, sku: &str) -> Option<&ProductConfig> {
        self.products.iter().find(|p| p.sku == sku)
    }

    pub fn product_mut(&mut self, sku: &str) -> Option<&mut ProductConfig> {
        self.products.iter_mut().find(|p| p.sku == sku)
    }

    /// 按配置顺序写入目录: 工艺路线 → 产品 → 工序
    ///
    /// 首个错误即中止 (启动期致命错误)
    pub fn install_into(&self, catalog: &ProcessCatalog) -> CatalogResult<()> {
        for process in &self.processes {
            catalog.register_process(process.process_id, &process.name)?;
        }
        for product in &self.products {
            catalog.register_product(&product.sku, &product.name, product.process_id)?;
        }
        for product in &self.products {
            catalog.define_operations(&product.sku, &product.operations)?;
        }
        Ok(())
    }

    /// 从目录导出配置 (客户列表为空)
    ///
    /// 尚未定义工序的产品导出为空工序列表
    pub fn from_catalog(catalog: &ProcessCatalog) -> Self {
        let processes = catalog
            .processes()
            .into_iter()
            .map(|p| ProcessConfig {
                process_id: p.process_id,
                name: p.name,
            })
            .collect();

        let products = catalog
            .products()
            .into_iter()
            .map(|p| {
                let operations = catalog
                    .lookup(&p.sku)
                    .map(|ops| ops.iter().map(OperationSpec::from).collect::<Vec<_>>())
                    .unwrap_or_default();
                ProductConfig {
                    sku: p.sku,
                    name: p.name,
                    process_id: p.process_id,
                    operations,
                }
            })
            .collect();

        Self {
            processes,
            products,
            customers: Vec::new(),
        }
    }
}

/// 由配置构建目录
pub fn build_catalog(config: &CatalogConfig) -> CatalogResult<ProcessCatalog> {
    let catalog = ProcessCatalog::new();
    config.install_into(&catalog)?;

    let stats = catalog.stats();
    tracing::info!(
        processes = stats.processes,
        products = stats.products,
        templates = stats.templates,
        "工艺目录构建完成"
    );
    Ok(catalog)
}
