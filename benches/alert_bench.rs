//! Benchmarks for new-order detection and cache lookups
//!
//! Run with: cargo bench

use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use futures_util::FutureExt;
use serde_json::{json, Value};

use dinedesk::cache::{QueryCache, QueryKey};
use dinedesk::models::{Order, OrderItems};
use dinedesk::notify::OrderAlertTracker;

fn create_orders(count: usize, pending_every: usize) -> Vec<Order> {
    (0..count)
        .map(|i| {
            let status = if i % pending_every == 0 { "pending" } else { "completed" };
            serde_json::from_value(json!({
                "id": format!("ord_{:06}", i),
                "status": status,
                "items": [{"name": "Burger", "quantity": 1, "price": 1200}],
                "total": 1200,
                "created_at": "2024-03-10T12:00:00Z"
            }))
            .unwrap()
        })
        .collect()
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_alert");

    for size in [50, 500, 5000] {
        let orders = create_orders(size, 7);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("steady_state_{}", size), |b| {
            let mut tracker = OrderAlertTracker::new();
            tracker.check(&orders);
            b.iter(|| tracker.check(black_box(&orders)))
        });

        group.bench_function(format!("first_load_{}", size), |b| {
            b.iter(|| {
                let mut tracker = OrderAlertTracker::new();
                tracker.check(black_box(&orders))
            })
        });
    }

    group.finish();
}

fn bench_item_decoding(c: &mut Criterion) {
    let encoded = serde_json::to_string(&json!([
        {"name": "Burger", "quantity": 2, "price": 1200, "modifiers": [{"name": "Cheese", "price": 100}]},
        {"name": "Fries", "quantity": 1, "price": 400},
        {"name": "Shake", "quantity": 3, "price": 550, "notes": "extra thick"}
    ]))
    .unwrap();

    c.bench_function("order_items_from_encoded", |b| {
        b.iter(|| OrderItems::from_encoded(black_box(&encoded)))
    });
}

fn bench_cache(c: &mut Criterion) {
    let cache = QueryCache::new();
    let keys: Vec<QueryKey> = (0..1000)
        .map(|i| QueryKey::new("orders").param("account_id", format!("acc_{}", i)))
        .collect();
    for key in &keys {
        cache.set(key, &json!({"n": 1})).unwrap();
    }

    c.bench_function("cache_fresh_hit", |b| {
        let key = &keys[500];
        b.iter(|| {
            cache
                .fetch(black_box(key), Duration::minutes(5), || async { Ok(Value::Null) })
                .now_or_never()
                .unwrap()
                .unwrap()
        })
    });

    c.bench_function("cache_invalidate_resource", |b| {
        b.iter(|| cache.invalidate_resource(black_box("orders")))
    });
}

criterion_group!(benches, bench_tracker, bench_item_decoding, bench_cache);
criterion_main!(benches);
