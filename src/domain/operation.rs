// ==========================================
// 制造执行系统 - 工序模板与工序实例
// ==========================================
// OperationSpec:      外部录入的工序定义 (工序类型为原始字符串)
// OperationTemplate:  校验后的工序模板 (目录内部持有)
// OperationInstance:  订单行上的工序副本 (独立跟踪状态)
// ==========================================

use crate::domain::types::{OperationStatus, OperationType};
use serde::{Deserialize, Serialize};

/// 工序模板 ID (标识工序"种类",同一工段在多个产品间复用)
pub type TemplateId = u32;

/// 工序实例 ID (进程内全局唯一)
pub type OperationId = u64;

/// 订单行 ID
pub type LineItemId = u64;

// ==========================================
// OperationSpec - 工序录入项
// ==========================================
// 来源: 静态配置 / CSV / 数据库行
// 兼容前端 DTO 的驼峰字段名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
    #[serde(alias = "templateId")]
    pub template_id: TemplateId, // 模板ID
    pub name: String,            // 工序名称
    pub code: String,            // 工序短码
    #[serde(alias = "type", alias = "operationType")]
    pub operation_type: String,  // 工序类型 (待校验)
    pub sequence: u32,           // 顺序号 (1起)
}

impl OperationSpec {
    pub fn new(
        template_id: TemplateId,
        name: impl Into<String>,
        code: impl Into<String>,
        operation_type: impl Into<String>,
        sequence: u32,
    ) -> Self {
        Self {
            template_id,
            name: name.into(),
            code: code.into(),
            operation_type: operation_type.into(),
            sequence,
        }
    }
}

impl From<&OperationTemplate> for OperationSpec {
    fn from(template: &OperationTemplate) -> Self {
        Self {
            template_id: template.template_id,
            name: template.name.clone(),
            code: template.code.clone(),
            operation_type: template.operation_type.as_str().to_string(),
            sequence: template.sequence,
        }
    }
}

// ==========================================
// OperationTemplate - 工序模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTemplate {
    pub template_id: TemplateId,
    pub name: String,
    pub code: String,
    pub operation_type: OperationType,
    pub sequence: u32,
}

impl OperationTemplate {
    /// 判断是否为同一工段 (模板ID + 名称 + 短码 完全一致)
    ///
    /// 共享上游工段(如炼钢)的产品必须复用同一组合
    pub fn is_same_stage(&self, template_id: TemplateId, name: &str) -> bool {
        self.template_id == template_id && self.name == name
    }

    /// 按模板生成工序实例
    pub fn instantiate(&self, operation_id: OperationId, line_item_id: LineItemId) -> OperationInstance {
        OperationInstance {
            operation_id,
            line_item_id,
            template_id: self.template_id,
            name: self.name.clone(),
            code: self.code.clone(),
            operation_type: self.operation_type,
            sequence: self.sequence,
            status: OperationStatus::NotStarted,
        }
    }
}

// ==========================================
// OperationInstance - 工序实例
// ==========================================
// 红线: 实例是下单时刻的副本,模板后续变更不回溯
// 输出字段对齐订单服务 DTO (驼峰)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInstance {
    pub operation_id: OperationId, // 工序实例ID (与模板ID无关)
    pub line_item_id: LineItemId,  // 所属订单行
    pub template_id: TemplateId,   // 来源模板
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub sequence: u32,
    pub status: OperationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> OperationTemplate {
        OperationTemplate {
            template_id: 2,
            name: "EAF Melting".to_string(),
            code: "EAF".to_string(),
            operation_type: OperationType::Furnace,
            sequence: 2,
        }
    }

    #[test]
    fn test_instantiate_copies_template_fields() {
        let instance = template().instantiate(77, 500);

        assert_eq!(instance.operation_id, 77);
        assert_eq!(instance.line_item_id, 500);
        assert_eq!(instance.template_id, 2);
        assert_eq!(instance.code, "EAF");
        assert_eq!(instance.sequence, 2);
        assert_eq!(instance.status, OperationStatus::NotStarted);
    }

    #[test]
    fn test_instance_serializes_with_dto_field_names() {
        let value = serde_json::to_value(template().instantiate(1, 9)).unwrap();

        assert_eq!(value["operationId"], 1);
        assert_eq!(value["templateId"], 2);
        assert_eq!(value["type"], "FURNACE");
        assert_eq!(value["status"], "NOT_STARTED");
    }

    #[test]
    fn test_spec_accepts_camel_case_fields() {
        let spec: OperationSpec = serde_json::from_str(
            r#"{"templateId":1,"name":"Scrap Charging","code":"SC","type":"FURNACE","sequence":1}"#,
        )
        .unwrap();

        assert_eq!(spec, OperationSpec::new(1, "Scrap Charging", "SC", "FURNACE", 1));
    }
}
