use criterion::{criterion_group, criterion_main, Criterion};
use seamcarve::carve::{CostMatrix, EnergyField, Grid};
use seamcarve::{CarvingScheme, Orientation, OwnedImage, Rgb, SeamCarver};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<Rgb> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = (((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as u8;
            data.push([value, value.wrapping_mul(3), value / 2]);
        }
    }
    data
}

fn bench_single_pass(c: &mut Criterion) {
    let (width, height) = (256, 256);
    let gray: Vec<u8> = make_image(width, height).iter().map(|p| p[0]).collect();
    let grid = Grid::from_vec(gray, width, height).unwrap();

    c.bench_function("energy_256", |b| {
        b.iter(|| black_box(EnergyField::compute(&grid).unwrap()));
    });

    let energy = EnergyField::compute(&grid).unwrap();
    c.bench_function("cost_fill_vertical_256", |b| {
        b.iter(|| black_box(CostMatrix::fill(&energy, &grid, Orientation::Vertical).unwrap()));
    });
    c.bench_function("cost_fill_horizontal_256", |b| {
        b.iter(|| black_box(CostMatrix::fill(&energy, &grid, Orientation::Horizontal).unwrap()));
    });
}

fn bench_carve(c: &mut Criterion) {
    let (width, height) = (160, 120);
    let img = OwnedImage::new(make_image(width, height), width, height).unwrap();
    let view = img.view();

    let mut group = c.benchmark_group("carve_160x120");
    group.sample_size(10);
    for (name, scheme) in [
        ("vertical_first", CarvingScheme::VerticalFirst),
        ("interleaved", CarvingScheme::Interleaved),
    ] {
        let carver = SeamCarver::to_size(view, 130, 100, scheme).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(carver.carve().unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_pass, bench_carve);
criterion_main!(benches);
