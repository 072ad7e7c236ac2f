use std::hint::black_box;

use astro_composite_rs::image_pipeline::{
    BandSet, DisplayParameters, IntensityGrid, compose, normalize, repair,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn generate_mock_band(width: usize, height: usize, seed: usize) -> IntensityGrid {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            // Roughly one gap in seven samples
            let value = if (x * 7 + y * 3 + seed) % 7 == 0 {
                0.0
            } else {
                ((x + y + seed) % 256) as f32
            };
            data.push(value);
        }
    }
    IntensityGrid::new(width, height, data).unwrap()
}

fn generate_band_set(width: usize, height: usize) -> BandSet {
    BandSet::new(
        normalize(&generate_mock_band(width, height, 0)),
        normalize(&generate_mock_band(width, height, 1)),
        normalize(&generate_mock_band(width, height, 2)),
    )
    .unwrap()
}

fn benchmark_repair_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let band = generate_mock_band(width, height, 0);
        group.bench_with_input(BenchmarkId::from_parameter(label), &band, |b, band| {
            b.iter(|| repair(black_box(band)));
        });
    }

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let band = generate_mock_band(500, 500, 0);

    group.bench_function("500x500", |b| {
        b.iter(|| normalize(black_box(&band)));
    });

    group.finish();
}

fn benchmark_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let bands = generate_band_set(1000, 1000);

    group.bench_function("default_parameters", |b| {
        b.iter(|| compose(black_box(&bands), DisplayParameters::default()));
    });

    group.bench_function("clipping_parameters", |b| {
        let params = DisplayParameters::builder()
            .red_gain(2.0)
            .green_gain(1.5)
            .ceiling(0.4)
            .build();
        b.iter(|| compose(black_box(&bands), params));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_repair_sizes,
    benchmark_normalize,
    benchmark_compose
);
criterion_main!(benches);
