// ==========================================
// 制造执行系统 - 工艺路线模板目录
// ==========================================
// 职责: SKU → 有序工序模板 的直接映射 + 工艺路线 → SKU 集合 的二级映射
// 并发: 每个 SKU 的工序列表为不可变 Arc<[OperationTemplate]>,整体替换
//       读路径只在分片上短暂取 Arc,不锁整个目录
//       写路径 (注册/定义) 由 write_lock 串行化,保证校验与安装原子
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::events::{
    CatalogEvent, CatalogEventKind, CatalogEventPublisher, NoOpEventPublisher,
};
use crate::catalog::id_allocator::{OperationIdAllocator, SequentialIdAllocator};
use crate::catalog::validator;
use crate::domain::{
    LineItemId, OperationInstance, OperationSpec, OperationTemplate, Process, ProcessId, Product,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

/// 单个 SKU 的已安装工序列表
#[derive(Debug, Clone)]
struct RouteEntry {
    revision: u64,
    operations: Arc<[OperationTemplate]>,
}

/// 产品完整路线快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRoute {
    pub product: Product,
    pub process: Process,
    pub revision: u64,
    pub operations: Vec<OperationTemplate>,
}

/// 目录统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    pub processes: usize,
    pub products: usize,
    pub defined_products: usize,
    pub templates: usize,
}

// ==========================================
// ProcessCatalog - 工艺路线模板目录
// ==========================================
pub struct ProcessCatalog {
    processes: DashMap<ProcessId, Process>,
    products: DashMap<String, Product>,
    routes: DashMap<String, RouteEntry>,
    process_products: DashMap<ProcessId, BTreeSet<String>>,
    write_lock: Mutex<()>,
    allocator: Arc<dyn OperationIdAllocator>,
    publisher: Arc<dyn CatalogEventPublisher>,
}

impl Default for ProcessCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessCatalog {
    /// 创建空目录 (工序实例ID从1开始自增)
    pub fn new() -> Self {
        Self::with_allocator(Arc::new(SequentialIdAllocator::default()))
    }

    /// 使用外部 ID 分配器创建空目录
    pub fn with_allocator(allocator: Arc<dyn OperationIdAllocator>) -> Self {
        Self {
            processes: DashMap::new(),
            products: DashMap::new(),
            routes: DashMap::new(),
            process_products: DashMap::new(),
            write_lock: Mutex::new(()),
            allocator,
            publisher: Arc::new(NoOpEventPublisher),
        }
    }

    /// 设置目录事件发布者
    pub fn with_publisher(mut self, publisher: Arc<dyn CatalogEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    // ===== 写路径 =====

    /// 注册工艺路线
    pub fn register_process(&self, process_id: ProcessId, name: &str) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        match self.processes.entry(process_id) {
            Entry::Occupied(_) => return Err(CatalogError::DuplicateProcess(process_id)),
            Entry::Vacant(slot) => {
                slot.insert(Process::new(process_id, name));
            }
        }
        self.process_products.entry(process_id).or_default();

        tracing::debug!(process_id, name, "工艺路线已注册");
        Ok(())
    }

    /// 注册产品
    ///
    /// 失败时目录状态不变 (先校验,后写入)
    pub fn register_product(&self, sku: &str, name: &str, process_id: ProcessId) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.processes.contains_key(&process_id) {
            return Err(CatalogError::UnknownProcess(process_id));
        }

        match self.products.entry(sku.to_string()) {
            Entry::Occupied(_) => return Err(CatalogError::DuplicateProduct(sku.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Product::new(sku, name, process_id));
            }
        }
        self.process_products
            .entry(process_id)
            .or_default()
            .insert(sku.to_string());

        tracing::debug!(sku, name, process_id, "产品已注册");
        Ok(())
    }

    /// 定义 (或整体替换) 产品的工序列表
    ///
    /// # 校验
    /// - SKU 已注册
    /// - 顺序号恰为 1..=n
    /// - 工序类型属于封闭枚举
    /// - 同一工艺路线内,短码对应的 template_id/name 与其他产品一致
    ///
    /// 任一校验失败则原列表保持不变。
    /// 目录事件在写锁释放后发布。
    pub fn define_operations(&self, sku: &str, specs: &[OperationSpec]) -> CatalogResult<()> {
        let guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let product = self
            .products
            .get(sku)
            .map(|p| p.value().clone())
            .ok_or_else(|| CatalogError::UnknownProduct(sku.to_string()))?;

        let templates = match self.validate_definition(&product, specs) {
            Ok(templates) => templates,
            Err(e) => {
                tracing::warn!(sku, error = %e, "工序定义被拒绝");
                return Err(e);
            }
        };

        let previous = self.routes.get(sku).map(|r| r.revision).unwrap_or(0);
        let revision = previous + 1;
        let operation_count = templates.len();

        self.routes.insert(
            sku.to_string(),
            RouteEntry {
                revision,
                operations: Arc::from(templates),
            },
        );
        // 发布者可能回调目录写路径,须在释放写锁后发布
        drop(guard);

        let kind = if previous == 0 {
            CatalogEventKind::OperationsDefined
        } else {
            CatalogEventKind::OperationsRedefined
        };
        tracing::info!(sku, revision, operation_count, kind = kind.as_str(), "工序定义已安装");

        let event = CatalogEvent {
            kind,
            sku: sku.to_string(),
            revision,
            operation_count,
        };
        if let Err(e) = self.publisher.publish(&event) {
            tracing::warn!(sku, error = %e, "目录事件发布失败");
        }

        Ok(())
    }

    fn validate_definition(
        &self,
        product: &Product,
        specs: &[OperationSpec],
    ) -> CatalogResult<Vec<OperationTemplate>> {
        validator::validate_sequence(&product.sku, specs)?;
        let templates = validator::parse_templates(&product.sku, specs)?;

        // 同路线其他产品的已安装列表 (快照)
        let siblings: Vec<(String, Arc<[OperationTemplate]>)> = self
            .skus_in_process(product.process_id)
            .into_iter()
            .filter(|other| other != &product.sku)
            .filter_map(|other| {
                let operations = self.routes.get(&other).map(|r| Arc::clone(&r.operations))?;
                Some((other, operations))
            })
            .collect();

        let existing = siblings
            .iter()
            .flat_map(|(owner, ops)| ops.iter().map(move |t| (owner.as_str(), t)));

        validator::validate_codes(product.process_id, &product.sku, &templates, existing)?;
        Ok(templates)
    }

    // ===== 读路径 =====

    /// 取 SKU 当前工序列表的不可变快照
    pub fn snapshot(&self, sku: &str) -> CatalogResult<Arc<[OperationTemplate]>> {
        if let Some(route) = self.routes.get(sku) {
            return Ok(Arc::clone(&route.operations));
        }
        if self.products.contains_key(sku) {
            Err(CatalogError::OperationsNotDefined(sku.to_string()))
        } else {
            Err(CatalogError::UnknownProduct(sku.to_string()))
        }
    }

    /// 查询 SKU 的有序工序模板 (副本,调用方修改不影响目录)
    pub fn lookup(&self, sku: &str) -> CatalogResult<Vec<OperationTemplate>> {
        Ok(self.snapshot(sku)?.to_vec())
    }

    /// 为订单行物化工序实例
    ///
    /// 实例数量与顺序与调用时刻的模板快照完全一致,
    /// 每个实例分配新的工序实例ID,状态为未开始
    pub fn materialize_order(
        &self,
        sku: &str,
        line_item_id: LineItemId,
    ) -> CatalogResult<Vec<OperationInstance>> {
        let operations = self.snapshot(sku)?;

        let instances: Vec<OperationInstance> = operations
            .iter()
            .map(|t| t.instantiate(self.allocator.next_id(), line_item_id))
            .collect();

        tracing::debug!(sku, line_item_id, count = instances.len(), "工序实例已物化");
        Ok(instances)
    }

    pub fn product(&self, sku: &str) -> CatalogResult<Product> {
        self.products
            .get(sku)
            .map(|p| p.value().clone())
            .ok_or_else(|| CatalogError::UnknownProduct(sku.to_string()))
    }

    pub fn process(&self, process_id: ProcessId) -> CatalogResult<Process> {
        self.processes
            .get(&process_id)
            .map(|p| p.value().clone())
            .ok_or(CatalogError::UnknownProcess(process_id))
    }

    /// 查询产品所属工艺路线
    pub fn process_of(&self, sku: &str) -> CatalogResult<Process> {
        let product = self.product(sku)?;
        self.process(product.process_id)
    }

    /// 产品 + 工艺路线 + 工序列表 的一致快照
    pub fn route(&self, sku: &str) -> CatalogResult<ProductRoute> {
        let product = self.product(sku)?;
        let process = self.process(product.process_id)?;
        let (revision, operations) = match self.routes.get(sku) {
            Some(route) => (route.revision, Arc::clone(&route.operations)),
            None => return Err(CatalogError::OperationsNotDefined(sku.to_string())),
        };

        Ok(ProductRoute {
            product,
            process,
            revision,
            operations: operations.to_vec(),
        })
    }

    /// 工序列表修订号 (0 表示尚未定义)
    pub fn revision(&self, sku: &str) -> CatalogResult<u64> {
        if !self.products.contains_key(sku) {
            return Err(CatalogError::UnknownProduct(sku.to_string()));
        }
        Ok(self.routes.get(sku).map(|r| r.revision).unwrap_or(0))
    }

    /// 工艺路线下的产品 (按 SKU 排序)
    pub fn products_in_process(&self, process_id: ProcessId) -> CatalogResult<Vec<Product>> {
        if !self.processes.contains_key(&process_id) {
            return Err(CatalogError::UnknownProcess(process_id));
        }

        Ok(self
            .skus_in_process(process_id)
            .iter()
            .filter_map(|sku| self.products.get(sku).map(|p| p.value().clone()))
            .collect())
    }

    /// 全部工艺路线 (按ID排序)
    pub fn processes(&self) -> Vec<Process> {
        let mut processes: Vec<Process> = self.processes.iter().map(|p| p.value().clone()).collect();
        processes.sort_by_key(|p| p.process_id);
        processes
    }

    /// 全部产品 (按 SKU 排序)
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.iter().map(|p| p.value().clone()).collect();
        products.sort_by(|a, b| a.sku.cmp(&b.sku));
        products
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            processes: self.processes.len(),
            products: self.products.len(),
            defined_products: self.routes.len(),
            templates: self.routes.iter().map(|r| r.operations.len()).sum(),
        }
    }

    fn skus_in_process(&self, process_id: ProcessId) -> Vec<String> {
        self.process_products
            .get(&process_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}
