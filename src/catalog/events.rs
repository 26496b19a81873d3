// ==========================================
// 制造执行系统 - 工艺目录变更事件
// ==========================================
// 职责: 定义目录变更事件发布 trait
// 说明: 工序重定义 (工程变更) 需要通知下游订单/看板
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;

/// 目录事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEventKind {
    /// 首次定义工序
    OperationsDefined,
    /// 工序重定义 (工程变更)
    OperationsRedefined,
}

impl CatalogEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            CatalogEventKind::OperationsDefined => "OperationsDefined",
            CatalogEventKind::OperationsRedefined => "OperationsRedefined",
        }
    }
}

/// 目录事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub kind: CatalogEventKind,
    pub sku: String,
    /// 定义后的修订号 (首次定义为 1)
    pub revision: u64,
    pub operation_count: usize,
}

/// 目录事件发布者
///
/// 发布失败只记录日志,不影响目录操作结果
pub trait CatalogEventPublisher: Send + Sync {
    fn publish(&self, event: &CatalogEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl CatalogEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: &CatalogEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(
            "NoOpEventPublisher: 跳过事件发布 - sku={}, kind={}",
            event.sku,
            event.kind.as_str()
        );
        Ok(())
    }
}
