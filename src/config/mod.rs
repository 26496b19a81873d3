// ==========================================
// 制造执行系统 - 配置层
// ==========================================
// 职责: 目录初始内容的配置结构、内置种子、环境变量
// 红线: 无进程级单例,配置显式传入构建函数
// ==========================================

pub mod catalog_config;
pub mod seed;

pub use catalog_config::{build_catalog, CatalogConfig, ProcessConfig, ProductConfig};
pub use seed::default_config;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "MES_CATALOG_CONFIG";

/// 读取配置文件路径环境变量 (空值视为未设置)
pub fn config_path_from_env() -> Option<String> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
