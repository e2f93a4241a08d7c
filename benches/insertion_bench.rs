//! Recording throughput benchmarks

use avl_replay::AvlRecorder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_insertion_sequence");
    for n in [16i64, 128, 512] {
        // Ascending keys force a rotation on most inserts
        let ascending: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::new("ascending", n), &ascending, |b, values| {
            let mut recorder = AvlRecorder::new();
            b.iter(|| black_box(recorder.generate_insertion_sequence(black_box(values))));
        });

        let scattered: Vec<i64> = (0..n).map(|i| (i * 7919) % 1009).collect();
        group.bench_with_input(BenchmarkId::new("scattered", n), &scattered, |b, values| {
            let mut recorder = AvlRecorder::new();
            b.iter(|| black_box(recorder.generate_insertion_sequence(black_box(values))));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_recording);
criterion_main!(benches);
