// ==========================================
// 制造执行系统 - 工艺路线与产品
// ==========================================
// Process: 工艺路线 (热轧/冷轧/棒材/连铸坯 ...)
// Product: 产品 (SKU 唯一, 且只属于一条工艺路线)
// ==========================================

use serde::{Deserialize, Serialize};

/// 工艺路线 ID
pub type ProcessId = u32;

// ==========================================
// Process - 工艺路线
// ==========================================
// 加载期构造,注册后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub process_id: ProcessId, // 工艺路线ID
    pub name: String,          // 路线名称
}

impl Process {
    pub fn new(process_id: ProcessId, name: impl Into<String>) -> Self {
        Self {
            process_id,
            name: name.into(),
        }
    }
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,           // 产品编码 (目录内唯一)
    pub name: String,          // 显示名称
    pub process_id: ProcessId, // 所属工艺路线
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, process_id: ProcessId) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            process_id,
        }
    }
}
