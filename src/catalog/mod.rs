// ==========================================
// 制造执行系统 - 工艺目录层
// ==========================================
// 职责: 工艺路线/产品/工序模板的注册、校验、查询与物化
// 红线: 读多写少,读者永远看不到半更新的工序列表
// ==========================================

pub mod error;
pub mod events;
pub mod id_allocator;
pub mod registry;
pub mod validator;

// 重导出核心类型
pub use error::{CatalogError, CatalogResult};
pub use events::{CatalogEvent, CatalogEventKind, CatalogEventPublisher, NoOpEventPublisher};
pub use id_allocator::{OperationIdAllocator, SequentialIdAllocator};
pub use registry::{CatalogStats, ProcessCatalog, ProductRoute};
