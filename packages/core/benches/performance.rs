//! Performance benchmarks for AssetTree core operations
//!
//! Run with: `cargo bench -p assettree-core`
//!
//! These benchmarks measure the store hot paths:
//! - Transactional merge-semantics upsert
//! - Point lookup
//! - Root listing via the parent index

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use assettree_core::db::{DatabaseService, TreeNodeStore};
use assettree_core::models::NodeWrite;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Setup a store over a fresh database
async fn setup_test_store() -> (Arc<TreeNodeStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("bench.db");

    let db = Arc::new(DatabaseService::new(db_path).await.unwrap());
    let store = Arc::new(TreeNodeStore::new(db));
    (store, temp_dir)
}

fn bench_save_node(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (store, _temp_dir) = rt.block_on(setup_test_store());

    let mut i = 0u64;
    c.bench_function("save_node", |b| {
        b.iter(|| {
            i += 1;
            let id = format!("node-{}", i);
            rt.block_on(async {
                store
                    .save_node(NodeWrite::new(black_box(&id)).with_name("Benchmark asset"))
                    .await
                    .unwrap()
            })
        })
    });
}

fn bench_load_node(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (store, _temp_dir) = rt.block_on(setup_test_store());

    rt.block_on(async {
        store
            .save_node(NodeWrite::new("hot").with_name("Hot asset"))
            .await
            .unwrap();
    });

    c.bench_function("load_node", |b| {
        b.iter(|| {
            rt.block_on(async { store.load_node(black_box("hot")).await.unwrap() })
        })
    });
}

fn bench_get_root_nodes(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (store, _temp_dir) = rt.block_on(setup_test_store());

    rt.block_on(async {
        for i in 0..100 {
            store
                .save_node(NodeWrite::new(format!("root-{}", i)).with_name(format!("Asset {}", i)))
                .await
                .unwrap();
        }
    });

    c.bench_function("get_root_nodes_100", |b| {
        b.iter(|| rt.block_on(async { black_box(store.get_root_nodes().await.unwrap()) }))
    });
}

criterion_group!(
    benches,
    bench_save_node,
    bench_load_node,
    bench_get_root_nodes
);
criterion_main!(benches);
