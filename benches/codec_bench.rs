use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use vault_handler::core::codec::{unzip, zip};
use vault_handler::core::dotenv::DotEnv;
use vault_handler::core::file::File;
use vault_handler::core::manifest::Entry;

/// Generate a payload of given size.
fn generate_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| b"abcdefghijklmnop\n"[i % 17]).collect()
}

/// Benchmark zip/unzip roundtrip with varying payload sizes.
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip_unzip");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [32, 256, 1024, 4096, 65536] {
        let payload = generate_payload(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("roundtrip", format!("{}B", size)),
            &payload,
            |b, payload| {
                b.iter(|| {
                    let encoded = zip(black_box(payload)).unwrap();
                    let decoded = unzip(black_box(encoded.as_bytes())).unwrap();
                    black_box(decoded);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark unzip only.
fn bench_unzip(c: &mut Criterion) {
    let mut group = c.benchmark_group("unzip");
    group.sample_size(50);

    for size in [1024, 65536] {
        let encoded = zip(&generate_payload(size)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}B", size)),
            &encoded,
            |b, encoded| b.iter(|| black_box(unzip(black_box(encoded.as_bytes())).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark merging many containers into a dot-env store.
fn bench_dotenv_merge(c: &mut Criterion) {
    let files: Vec<File> = (0..500)
        .map(|i| {
            File::new(
                "app",
                "",
                Entry::new(format!("secret{}", i), "txt"),
                format!("value with 'quotes' {}", i).into_bytes(),
            )
        })
        .collect();
    let dir = std::env::temp_dir();

    c.bench_function("dotenv_merge_500", |b| {
        b.iter(|| {
            let mut env = DotEnv::new(&dir, &tracing::Span::none());
            env.merge(black_box(&files));
            black_box(env.entries().len());
        });
    });
}

criterion_group!(benches, bench_roundtrip, bench_unzip, bench_dotenv_merge);
criterion_main!(benches);
