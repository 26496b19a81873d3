// ==========================================
// 制造执行系统 - 生产订单生成
// ==========================================
// 职责: 按目录为订单行物化工序序列,生成生产订单
// 说明: 演示订单按客户/产品轮转生成,结果确定可复现
// ==========================================

use crate::catalog::{CatalogError, CatalogResult, ProcessCatalog};
use crate::domain::{Customer, LineItem, LineItemId, OrderLineRequest, ProductionOrder};
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// 默认交货周期 (天)
pub const DEFAULT_LEAD_TIME_DAYS: i64 = 21;

/// 单次生成演示订单数量上限
pub const MAX_DEMO_ORDERS: usize = 1_000;

// ==========================================
// OrderGenerator - 订单生成器
// ==========================================
pub struct OrderGenerator {
    catalog: Arc<ProcessCatalog>,
    next_line_item_id: AtomicU64,
    next_order_seq: AtomicU64,
    lead_time_days: i64,
}

impl OrderGenerator {
    pub fn new(catalog: Arc<ProcessCatalog>) -> Self {
        Self {
            catalog,
            next_line_item_id: AtomicU64::new(1),
            next_order_seq: AtomicU64::new(1),
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }

    /// 设置订单行ID起始值 (与外部订单存储对齐)
    pub fn with_line_item_start(self, start: LineItemId) -> Self {
        self.next_line_item_id.store(start, Ordering::Relaxed);
        self
    }

    pub fn with_lead_time_days(mut self, days: i64) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 创建生产订单 (创建时间为当前时刻)
    pub fn create_order(
        &self,
        customer: &Customer,
        lines: &[OrderLineRequest],
    ) -> CatalogResult<ProductionOrder> {
        self.create_order_at(customer, lines, Utc::now())
    }

    /// 创建生产订单
    ///
    /// # 校验
    /// - 订单行非空
    /// - 每行数量为正数
    /// - 每行 SKU 已定义工序 (否则 UnknownProduct / OperationsNotDefined)
    pub fn create_order_at(
        &self,
        customer: &Customer,
        lines: &[OrderLineRequest],
        created_at: DateTime<Utc>,
    ) -> CatalogResult<ProductionOrder> {
        if lines.is_empty() {
            return Err(CatalogError::EmptyOrder);
        }
        for line in lines {
            if !(line.quantity.is_finite() && line.quantity > 0.0) {
                return Err(CatalogError::InvalidQuantity {
                    sku: line.sku.clone(),
                    quantity: line.quantity,
                });
            }
        }

        let mut line_items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.catalog.product(&line.sku)?;
            let line_item_id = self.next_line_item_id.fetch_add(1, Ordering::Relaxed);
            let operations = self.catalog.materialize_order(&line.sku, line_item_id)?;

            line_items.push(LineItem {
                line_item_id,
                sku: product.sku,
                product_name: product.name,
                quantity: line.quantity,
                operations,
            });
        }

        let seq = self.next_order_seq.fetch_add(1, Ordering::Relaxed);
        let order = ProductionOrder {
            order_id: Uuid::new_v4(),
            order_number: format!("ORD-{}-{:04}", created_at.format("%Y%m%d"), seq),
            customer: customer.clone(),
            created_at,
            due_date: created_at.date_naive() + Duration::days(self.lead_time_days),
            line_items,
        };

        tracing::info!(
            order_number = %order.order_number,
            customer = %customer.code,
            lines = order.line_items.len(),
            operations = order.operation_count(),
            "生产订单已创建"
        );
        Ok(order)
    }

    /// 生成演示订单
    ///
    /// 客户按顺序轮转; 第 i 个订单含 1 + i % 3 行,产品从已定义工序的产品中轮转选取;
    /// 订单创建时间自 `start` 起每 6 小时一个; 数量超过 `MAX_DEMO_ORDERS` 时截断
    pub fn generate_demo_orders(
        &self,
        customers: &[Customer],
        count: usize,
        start: DateTime<Utc>,
    ) -> CatalogResult<Vec<ProductionOrder>> {
        let skus: Vec<String> = self
            .catalog
            .products()
            .into_iter()
            .filter(|p| self.catalog.revision(&p.sku).map(|r| r > 0).unwrap_or(false))
            .map(|p| p.sku)
            .collect();

        if customers.is_empty() || skus.is_empty() {
            tracing::warn!(
                customers = customers.len(),
                products = skus.len(),
                "缺少客户或产品,跳过演示订单生成"
            );
            return Ok(Vec::new());
        }

        if count > MAX_DEMO_ORDERS {
            tracing::warn!(requested = count, max = MAX_DEMO_ORDERS, "演示订单数量超出上限,已截断");
        }
        let count = count.min(MAX_DEMO_ORDERS);

        let mut orders = Vec::with_capacity(count);
        for i in 0..count {
            let customer = &customers[i % customers.len()];
            let line_count = (1 + i % 3).min(skus.len());
            let lines: Vec<OrderLineRequest> = (0..line_count)
                .map(|j| {
                    let sku = &skus[(i + j) % skus.len()];
                    let quantity = 20.0 + ((i * 7 + j * 13) % 10) as f64 * 5.0;
                    OrderLineRequest::new(sku.as_str(), quantity)
                })
                .collect();

            let created_at = start + Duration::hours(i as i64 * 6);
            orders.push(self.create_order_at(customer, &lines, created_at)?);
        }

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_catalog, default_config};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn generator() -> OrderGenerator {
        let catalog = build_catalog(&default_config()).unwrap();
        OrderGenerator::new(Arc::new(catalog))
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_create_order_materializes_each_line() {
        let gen = generator().with_line_item_start(500);
        let customer = Customer::new("CUST-001", "Northern Auto Parts");
        let lines = [
            OrderLineRequest::new("HR-COIL-2MM", 120.0),
            OrderLineRequest::new("CR-SHEET-1MM", 40.0),
        ];

        let order = gen.create_order_at(&customer, &lines, start()).unwrap();

        assert_eq!(order.order_number, "ORD-20260302-0001");
        assert_eq!(order.due_date.to_string(), "2026-03-23");
        assert_eq!(order.line_items[0].line_item_id, 500);
        assert_eq!(order.line_items[0].operations.len(), 8);
        assert_eq!(order.line_items[1].operations.len(), 4);
        assert!(order.line_items[1].operations.iter().all(|o| o.line_item_id == 501));
        assert_eq!(order.operation_count(), 12);
        assert_eq!(order.total_quantity(), 160.0);
    }

    #[test]
    fn test_create_order_rejects_empty_and_bad_quantity() {
        let gen = generator();
        let customer = Customer::new("CUST-001", "Northern Auto Parts");

        assert_eq!(gen.create_order(&customer, &[]), Err(CatalogError::EmptyOrder));
        assert!(matches!(
            gen.create_order(&customer, &[OrderLineRequest::new("HR-COIL-2MM", 0.0)]),
            Err(CatalogError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_create_order_unknown_sku() {
        let gen = generator();
        let customer = Customer::new("CUST-001", "Northern Auto Parts");

        let err = gen
            .create_order(&customer, &[OrderLineRequest::new("GHOST", 1.0)])
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownProduct("GHOST".to_string()));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_demo_orders_are_deterministic_in_shape() {
        let config = default_config();
        let gen = generator();
        let orders = gen.generate_demo_orders(&config.customers, 12, start()).unwrap();

        assert_eq!(orders.len(), 12);
        assert_eq!(orders[0].customer.code, "CUST-001");
        assert_eq!(orders[6].customer.code, "CUST-001");
        assert_eq!(orders[0].line_items.len(), 1);
        assert_eq!(orders[2].line_items.len(), 3);
        assert_eq!(orders[1].created_at, start() + Duration::hours(6));

        let op_ids: Vec<_> = orders
            .iter()
            .flat_map(|o| o.line_items.iter())
            .flat_map(|l| l.operations.iter().map(|op| op.operation_id))
            .collect();
        let unique: HashSet<_> = op_ids.iter().copied().collect();
        assert_eq!(unique.len(), op_ids.len());
    }

    #[test]
    fn test_demo_order_count_is_capped() {
        let config = default_config();
        let orders = generator()
            .generate_demo_orders(&config.customers, usize::MAX, start())
            .unwrap();

        assert_eq!(orders.len(), MAX_DEMO_ORDERS);
        let last = orders.last().unwrap();
        assert_eq!(last.created_at, start() + Duration::hours((MAX_DEMO_ORDERS as i64 - 1) * 6));
    }

    #[test]
    fn test_demo_orders_without_customers() {
        let gen = generator();
        assert!(gen.generate_demo_orders(&[], 5, start()).unwrap().is_empty());
    }
}
