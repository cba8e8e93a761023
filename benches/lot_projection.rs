// SPDX-License-Identifier: MPL-2.0
use auction_lots::lots::{LotModel, LotNumber};
use auction_lots::media::ImageHandle;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

const IMAGES: usize = 10_000;

fn handles() -> Vec<ImageHandle> {
    (0..IMAGES)
        .map(|i| ImageHandle::new(format!("/photos/IMG_{i:05}.jpg")))
        .collect()
}

/// Three images per lot, every tenth one typed in by hand.
fn populated_model(handles: &[ImageHandle]) -> LotModel {
    let mut model = LotModel::new();
    for (i, handle) in handles.iter().enumerate() {
        if i % 10 == 9 {
            let _ = model.assign_to_manual_lot(handle, (i / 3) as i64 + 1);
        } else if i % 3 == 0 {
            model.assign_to_next_lot(handle);
        } else {
            let _ = model.assign_to_previous_lot(handle);
        }
    }
    model
}

fn lot_projection_benchmark(c: &mut Criterion) {
    let handles = handles();
    let model = populated_model(&handles);
    let mut group = c.benchmark_group("lot_projection");

    group.bench_function("assign_10k", |b| {
        b.iter(|| black_box(populated_model(black_box(&handles))));
    });

    group.bench_function("snapshot_10k", |b| {
        b.iter(|| black_box(model.snapshot_lots()));
    });

    group.bench_function("walk_all_lots", |b| {
        b.iter_batched(
            || model.snapshot_lots(),
            |projection| {
                let mut lot = projection.first_lot();
                let mut visited = 0_usize;
                while let Some(current) = lot {
                    visited += projection.images(current).map_or(0, <[ImageHandle]>::len);
                    lot = projection.next_after(current);
                }
                black_box(visited)
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("parse_lot_number", |b| {
        b.iter(|| black_box(LotNumber::parse(black_box(" 1234 "))));
    });

    group.finish();
}

criterion_group!(benches, lot_projection_benchmark);
criterion_main!(benches);
