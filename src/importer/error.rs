// ==========================================
// 制造执行系统 - 种子数据导入错误类型
// ==========================================
// 覆盖: 文件读取 / JSON / CSV / 目录校验
// 工具: thiserror 派生宏
// ==========================================

use crate::catalog::CatalogError;
use thiserror::Error;

/// 种子数据导入错误类型
#[derive(Error, Debug)]
pub enum SeedError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 数据映射错误 =====
    #[error("CSV 解析失败 (行 {row}): {message}")]
    CsvParseError { row: usize, message: String },

    #[error("字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {value}")]
    TypeConversionError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 目录校验错误 =====
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::JsonParseError(err.to_string())
    }
}

impl From<csv::Error> for SeedError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.line() as usize).unwrap_or(0);
        SeedError::CsvParseError {
            row,
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type SeedResult<T> = Result<T, SeedError>;
