// ==========================================
// 制造执行系统 - 领域类型定义
// ==========================================
// 工序类型为封闭枚举,不允许自由文本
// 序列化格式: SCREAMING_SNAKE_CASE (与后端 DTO 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工序类型 (Operation Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Furnace,       // 冶炼/加热炉
    Caster,        // 连铸
    Rolling,       // 轧制
    Cooling,       // 冷却
    Pickling,      // 酸洗
    HeatTreatment, // 热处理
}

impl OperationType {
    /// 全部工序类型 (封闭集合)
    pub const ALL: [OperationType; 6] = [
        OperationType::Furnace,
        OperationType::Caster,
        OperationType::Rolling,
        OperationType::Cooling,
        OperationType::Pickling,
        OperationType::HeatTreatment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Furnace => "FURNACE",
            OperationType::Caster => "CASTER",
            OperationType::Rolling => "ROLLING",
            OperationType::Cooling => "COOLING",
            OperationType::Pickling => "PICKLING",
            OperationType::HeatTreatment => "HEAT_TREATMENT",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 无法识别的工序类型 (携带原始值)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperationType(pub String);

impl fmt::Display for UnknownOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "未知工序类型: {}", self.0)
    }
}

impl std::error::Error for UnknownOperationType {}

impl FromStr for OperationType {
    type Err = UnknownOperationType;

    /// 严格解析: 必须与 `as_str` 完全一致 (区分大小写)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownOperationType(s.to_string()))
    }
}

// ==========================================
// 工序执行状态 (Operation Status)
// ==========================================
// 说明: 状态机由后端维护,本库只负责初始状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    NotStarted, // 未开始
    InProgress, // 进行中
    Completed,  // 已完成
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::NotStarted => write!(f, "NOT_STARTED"),
            OperationStatus::InProgress => write!(f, "IN_PROGRESS"),
            OperationStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}
