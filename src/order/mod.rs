// ==========================================
// 制造执行系统 - 订单层
// ==========================================
// 职责: 下单时从目录读取模板,生成独立的工序实例副本
// ==========================================

pub mod generator;

pub use generator::{OrderGenerator, DEFAULT_LEAD_TIME_DAYS, MAX_DEMO_ORDERS};
