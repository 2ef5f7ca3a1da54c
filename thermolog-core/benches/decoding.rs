use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use thermolog_core::{decoder::decode_frame, encoder::FrameBuilder, replay_capture, SENSOR_COUNT};

fn bench_decode(c: &mut Criterion) {
    let frame = FrameBuilder::new(2)
        .decimal_position(2)
        .magnitude(12345)
        .build()
        .unwrap();

    c.bench_function("decode_frame", |b| {
        b.iter(|| decode_frame(black_box(&frame)).unwrap());
    });
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");

    for cycles in [16usize, 256, 4096] {
        let mut stream = Vec::new();
        for cycle in 0..cycles {
            for sensor in 0..SENSOR_COUNT {
                let frame = FrameBuilder::new(sensor)
                    .decimal_position(1)
                    .magnitude(200 + (cycle % 50) as u32)
                    .build()
                    .unwrap();
                stream.extend_from_slice(&frame);
            }
        }

        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cycles), &stream, |b, data| {
            b.iter(|| replay_capture(black_box(data)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_replay);
criterion_main!(benches);
