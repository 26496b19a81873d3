// ==========================================
// 制造执行系统 - 领域模型层
// ==========================================
// 职责: 定义工艺路线、产品、工序模板与订单实体
// 红线: 不含数据访问逻辑,不含目录校验逻辑
// ==========================================

pub mod operation;
pub mod order;
pub mod process;
pub mod types;

// 重导出核心类型
pub use operation::{
    LineItemId, OperationId, OperationInstance, OperationSpec, OperationTemplate, TemplateId,
};
pub use order::{Customer, LineItem, OrderLineRequest, ProductionOrder};
pub use process::{Process, ProcessId, Product};
pub use types::{OperationStatus, OperationType, UnknownOperationType};
