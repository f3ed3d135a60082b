//! 指标聚合性能

use std::hint::black_box;

use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use smartlink::services::aggregate;
use smartlink::storage::{ClickEvent, ClickKind};

const PLATFORMS: &[&str] = &["spotify", "apple_music", "deezer", "tidal", "youtube_music"];

fn synthetic_events(items: usize, count: usize) -> (Vec<String>, Vec<ClickEvent>) {
    let ids: Vec<String> = (0..items).map(|i| format!("link-{}", i)).collect();
    let now = Utc::now();
    let events = (0..count)
        .map(|i| {
            let kind = if i % 4 == 0 {
                ClickKind::Click
            } else {
                ClickKind::View
            };
            ClickEvent {
                link_id: ids[i % items].clone(),
                kind,
                platform_id: (kind == ClickKind::Click)
                    .then(|| PLATFORMS[i % PLATFORMS.len()].to_string()),
                referrer: None,
                created_at: now,
            }
        })
        .collect();
    (ids, events)
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_aggregate");

    for &count in &[1_000usize, 10_000, 100_000] {
        let (ids, events) = synthetic_events(50, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| aggregate(black_box(&ids), black_box(events)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
