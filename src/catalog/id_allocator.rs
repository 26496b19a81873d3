// ==========================================
// 制造执行系统 - 工序实例 ID 分配
// ==========================================
// 工序实例ID与模板ID无关,进程内全局唯一
// ==========================================

use crate::domain::OperationId;
use std::sync::atomic::{AtomicU64, Ordering};

/// 工序实例 ID 分配器
///
/// 可注入外部实现 (例如与订单存储共享号段)
pub trait OperationIdAllocator: Send + Sync {
    fn next_id(&self) -> OperationId;
}

/// 进程内自增分配器
#[derive(Debug)]
pub struct SequentialIdAllocator {
    next: AtomicU64,
}

impl SequentialIdAllocator {
    pub fn new(start: OperationId) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialIdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl OperationIdAllocator for SequentialIdAllocator {
    fn next_id(&self) -> OperationId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_configured_value() {
        let allocator = SequentialIdAllocator::new(1000);
        assert_eq!(allocator.next_id(), 1000);
        assert_eq!(allocator.next_id(), 1001);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let allocator = Arc::new(SequentialIdAllocator::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                thread::spawn(move || (0..250).map(|_| allocator.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
