use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gx2_tiling::{untile, AddressTranslator, SurfaceDescriptor, SurfaceInfo, TexelCoord, TileMode};
use std::hint::black_box;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn surface_info(mode: TileMode, size: u32, bpp: u32) -> SurfaceInfo {
    let descriptor = SurfaceDescriptor::builder()
        .width(size)
        .height(size)
        .bits_per_element(bpp)
        .tile_mode(mode)
        .build()
        .unwrap();
    SurfaceInfo::compute(&descriptor).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Untile 1024x1024");

    for (mode, bpp) in [
        (TileMode::Tiled1DThin1, 32),
        (TileMode::Tiled2DThin1, 32),
        (TileMode::Tiled2BThin1, 32),
        (TileMode::Tiled2DThin1, 8),
        (TileMode::Tiled2DThin1, 128),
    ] {
        let info = surface_info(mode, 1024, bpp);
        let tiled: Vec<u8> = (0..info.total_bytes()).map(|i| (i % 251) as u8).collect();

        group.throughput(Throughput::Bytes(info.total_bytes()));
        group.bench_with_input(
            BenchmarkId::new(format!("{mode:?}"), bpp),
            &tiled,
            |b, tiled| b.iter(|| untile(black_box(&info), black_box(tiled)).unwrap()),
        );
    }
    group.finish();

    // Per-element address computation alone.
    let mut group = c.benchmark_group("Address 256x256");
    for mode in [TileMode::Tiled1DThin1, TileMode::Tiled2DThin1, TileMode::Tiled3BThin1] {
        let info = surface_info(mode, 256, 32);
        let translator = AddressTranslator::new(&info).unwrap();

        group.throughput(Throughput::Elements(256 * 256));
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| {
                let mut sum = 0u64;
                for y in 0..256 {
                    for x in 0..256 {
                        sum ^= translator.address(TexelCoord::new(x, y, 0, 0)).unwrap();
                    }
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
