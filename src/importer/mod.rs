// ==========================================
// 制造执行系统 - 导入层
// ==========================================
// 职责: 从外部文件读取目录种子数据
// 支持: JSON, CSV (数据库见 repository)
// ==========================================

pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use error::{SeedError, SeedResult};
pub use file_parser::{
    apply_operation_csv, load_config_from_json, load_operations_from_csv, parse_operations_csv,
};
