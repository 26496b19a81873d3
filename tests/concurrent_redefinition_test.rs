// ==========================================
// 并发读写测试
// ==========================================
// 职责: 验证工程变更重定义期间,读者只看到完整的工序列表
// ==========================================


use mes_process_catalog::domain::OperationSpec;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use test_helpers::*;

/// 短版本: 3 道工序,代码全部以 "A" 结尾
fn short_ops() -> Vec<OperationSpec> {
    (1..=3)
        .map(|seq| OperationSpec::new(200 + seq, format!("Short {}", seq), format!("S{}A", seq), "ROLLING", seq))
        .collect()
}

/// 长版本: 6 道工序,代码全部以 "B" 结尾
fn long_ops() -> Vec<OperationSpec> {
    (1..=6)
        .map(|seq| OperationSpec::new(300 + seq, format!("Long {}", seq), format!("L{}B", seq), "FURNACE", seq))
        .collect()
}

#[test]
fn test_readers_never_observe_partial_lists() {
    let catalog = Arc::new(hot_rolling_fixture());
    catalog.define_operations(HR_COIL, &short_ops()).unwrap();

    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut observed = 0usize;
                while !stop.load(Ordering::Relaxed) || observed == 0 {
                    let ops = catalog.lookup(HR_COIL).unwrap();
                    let suffixes: HashSet<char> =
                        ops.iter().filter_map(|o| o.code.chars().last()).collect();

                    // 要么整份短版本,要么整份长版本
                    assert_eq!(suffixes.len(), 1);
                    match suffixes.iter().next() {
                        Some('A') => assert_eq!(ops.len(), 3),
                        Some('B') => assert_eq!(ops.len(), 6),
                        other => panic!("unexpected suffix {:?}", other),
                    }

                    let instances = catalog.materialize_order(HR_COIL, 1).unwrap();
                    assert!(instances.len() == 3 || instances.len() == 6);
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    for round in 0..200 {
        let ops = if round % 2 == 0 { long_ops() } else { short_ops() };
        catalog.define_operations(HR_COIL, &ops).unwrap();
    }
    stop.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
    assert_eq!(catalog.revision(HR_COIL), Ok(201));
}

#[test]
fn test_concurrent_materialize_ids_unique() {
    let catalog = Arc::new(defined_hot_rolling_fixture());
    let seen = Arc::new(Mutex::new(HashSet::new()));

    let workers: Vec<_> = (0..8u64)
        .map(|worker| {
            let catalog = Arc::clone(&catalog);
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                for line in 0..25u64 {
                    let instances = catalog.materialize_order(HR_COIL, worker * 100 + line).unwrap();
                    let mut seen = seen.lock().unwrap();
                    for instance in instances {
                        assert!(seen.insert(instance.operation_id));
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(seen.lock().unwrap().len(), 8 * 25 * 8);
}
