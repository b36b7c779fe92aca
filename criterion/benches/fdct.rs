use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use luma_jpeg::{forward_dct_fast, forward_dct_matrix, RasterBlock};

fn shifted_block() -> RasterBlock<i8> {
    let mut block = RasterBlock([0i8; 64]);
    for (i, v) in block.0.iter_mut().enumerate() {
        *v = (((i * 73 + 17) % 256) as i16 - 128) as i8;
    }
    block
}

fn bench_fdct(c: &mut Criterion) {
    let samples = shifted_block();

    let mut group = c.benchmark_group("fdct");
    group.throughput(Throughput::Elements(1));

    group.bench_function("matrix", |b| {
        b.iter(|| forward_dct_matrix(black_box(&samples)))
    });

    group.bench_function("fast", |b| {
        b.iter(|| forward_dct_fast(black_box(&samples)))
    });

    group.finish();
}

criterion_group!(benches, bench_fdct);
criterion_main!(benches);
