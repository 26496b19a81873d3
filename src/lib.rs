// ==========================================
// 制造执行系统 - 工艺路线模板目录 核心库
// ==========================================
// 职责: 产品 → 工艺路线 → 有序工序模板 的注册、校验与订单物化
// 系统定位: 进程内只读为主的目录,启动时由配置源装载
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 目录层 - 注册/校验/查询/物化
pub mod catalog;

// 配置层 - 目录配置与内置种子
pub mod config;

// 导入层 - JSON/CSV 种子文件
pub mod importer;

// 数据仓储层 - SQLite 种子数据
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 订单层 - 生产订单生成
pub mod order;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Customer, LineItem, OperationInstance, OperationSpec, OperationStatus, OperationTemplate,
    OperationType, OrderLineRequest, Process, Product, ProductionOrder,
};

// 目录
pub use catalog::{CatalogError, CatalogResult, ProcessCatalog, ProductRoute};

// 配置
pub use config::{build_catalog, default_config, CatalogConfig};

// 订单
pub use order::OrderGenerator;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工艺路线模板目录";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
