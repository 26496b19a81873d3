// ==========================================
// 制造执行系统 - 工艺目录错误类型
// ==========================================
// 全部为本地、同步、不可重试的数据/配置错误
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::{ProcessId, TemplateId};
use thiserror::Error;

/// 工艺目录错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    // ===== 注册错误 =====
    #[error("工艺路线重复注册: process_id={0}")]
    DuplicateProcess(ProcessId),

    #[error("工艺路线不存在: process_id={0}")]
    UnknownProcess(ProcessId),

    #[error("产品重复注册: sku={0}")]
    DuplicateProduct(String),

    #[error("产品不存在: sku={0}")]
    UnknownProduct(String),

    // ===== 工序定义错误 =====
    #[error("工序顺序号非法 (sku={sku}): {message}")]
    InvalidSequence { sku: String, message: String },

    #[error("未知工序类型 (sku={sku}, code={code}): {value}")]
    UnknownOperationType {
        sku: String,
        code: String,
        value: String,
    },

    #[error(
        "工序短码冲突 (process_id={process_id}, code={code}): \
         {existing_sku} 定义为 template_id={existing_template_id} name={existing_name}, \
         {sku} 定义为 template_id={template_id} name={name}"
    )]
    DuplicateCodeConflict {
        process_id: ProcessId,
        code: String,
        existing_sku: String,
        existing_template_id: TemplateId,
        existing_name: String,
        sku: String,
        template_id: TemplateId,
        name: String,
    },

    #[error("产品尚未定义工序: sku={0}")]
    OperationsNotDefined(String),

    // ===== 订单错误 =====
    #[error("订单行数量非法 (sku={sku}): {quantity}")]
    InvalidQuantity { sku: String, quantity: f64 },

    #[error("订单不含任何订单行")]
    EmptyOrder,
}

impl CatalogError {
    /// 是否为调用方输入错误 (对外映射为 4xx)
    ///
    /// 其余错误均为目录数据缺陷,应在数据源修正
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownProduct(_)
                | CatalogError::OperationsNotDefined(_)
                | CatalogError::InvalidQuantity { .. }
                | CatalogError::EmptyOrder
        )
    }
}

/// Result 类型别名
pub type CatalogResult<T> = Result<T, CatalogError>;
