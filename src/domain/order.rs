// ==========================================
// 制造执行系统 - 生产订单领域模型
// ==========================================
// 订单行引用一个产品,并持有下单时刻物化的工序序列
// ==========================================

use crate::domain::operation::{LineItemId, OperationInstance};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Customer - 客户
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub code: String, // 客户代码
    pub name: String, // 客户名称
}

impl Customer {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// 下单请求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub sku: String,
    pub quantity: f64, // 吨
}

impl OrderLineRequest {
    pub fn new(sku: impl Into<String>, quantity: f64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

// ==========================================
// LineItem - 订单行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub line_item_id: LineItemId,
    pub sku: String,
    pub product_name: String,
    pub quantity: f64,
    pub operations: Vec<OperationInstance>,
}

// ==========================================
// ProductionOrder - 生产订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOrder {
    pub order_id: Uuid,             // 订单主键
    pub order_number: String,       // 订单号 (ORD-YYYYMMDD-NNNN)
    pub customer: Customer,         // 客户
    pub created_at: DateTime<Utc>,  // 创建时间
    pub due_date: NaiveDate,        // 交货期
    pub line_items: Vec<LineItem>,  // 订单行
}

impl ProductionOrder {
    /// 订单内工序实例总数
    pub fn operation_count(&self) -> usize {
        self.line_items.iter().map(|l| l.operations.len()).sum()
    }

    /// 订单总吨位
    pub fn total_quantity(&self) -> f64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }

    pub fn line_item(&self, line_item_id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|l| l.line_item_id == line_item_id)
    }
}
