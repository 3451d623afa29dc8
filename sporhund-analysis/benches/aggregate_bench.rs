use criterion::{criterion_group, criterion_main, Criterion};
use sporhund_analysis::summarize;
use sporhund_core::PacketRecord;

fn synthetic_records(count: usize) -> Vec<PacketRecord> {
    (0..count)
        .map(|i| PacketRecord {
            source: format!("10.0.{}.{}", (i / 250) % 250, i % 250).parse().unwrap(),
            dest: format!("10.1.{}.{}", (i / 17) % 250, i % 13).parse().unwrap(),
            protocol: match i % 3 {
                0 => 6,
                1 => 17,
                _ => 1,
            },
            size_bytes: 64 + (i as u64 % 1400),
            dest_port: (i % 3 == 0).then(|| (i % 65_535) as u16),
        })
        .collect()
}

fn bench_summarize(c: &mut Criterion) {
    let records = synthetic_records(100_000);
    c.bench_function("summarize_100k", |b| b.iter(|| summarize(&records)));
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
