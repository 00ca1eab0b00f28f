use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use permkit::{resolve, resolve_with_options, sort_permissions, Entry, ResolveOptions};
use std::hint::black_box;

fn bench_resolve(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap();
    let berlin = ResolveOptions::with_timezone("Europe/Berlin").unwrap();

    let mut group = c.benchmark_group("resolve");
    group.bench_function("relative", |b| {
        b.iter(|| resolve(black_box("30 days"), now))
    });
    group.bench_function("absolute", |b| {
        b.iter(|| resolve(black_box("2026-06-01T12:00:00Z"), now))
    });
    group.bench_function("absolute_missing_seconds_zoned", |b| {
        b.iter(|| resolve_with_options(black_box("2026-06-01T12:00"), now, &berlin))
    });
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let entries: Vec<Entry> = (0..1_000)
        .map(|i| {
            let entry = Entry::new(format!("node.{}", (i * 7919) % 1_000), i % 2 == 0);
            match i % 3 {
                0 => entry,
                1 => entry.in_world(format!("world{}", i % 5)),
                _ => entry.in_region(format!("region{}", i % 4)),
            }
        })
        .collect();

    c.bench_function("sort_permissions_1000", |b| {
        b.iter(|| sort_permissions(black_box(&entries)))
    });
}

criterion_group!(benches, bench_resolve, bench_sort);
criterion_main!(benches);
