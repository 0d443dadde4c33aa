use criterion::{black_box, criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};
use dynamic_connectivity::lists::{splay::Splays, treap::Treaps, Lists};
use flexi_logger::Logger;
use rand::{Rng, SeedableRng};

fn bench_list_impl<L: Lists>(b: &mut Bencher, seed: u64, n: usize, q: usize) {
    b.iter(|| {
        let mut l = black_box(L::new(n));
        for _ in 0..n {
            l.create(black_box(()));
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for _ in 0..q {
            match rng.gen_range(0..100) {
                0..=39 => {
                    let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
                    if !l.on_same_list(u, v) {
                        black_box(l.concat(u, v));
                    }
                }
                40..=69 => {
                    let u = rng.gen_range(0..n);
                    black_box(l.split_before(u));
                }
                70..=84 => {
                    let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
                    black_box(l.on_same_list(u, v));
                }
                _ => {
                    let u = rng.gen_range(0..n);
                    black_box(l.len(u));
                }
            }
        }
    });
}

fn bench_list(c: &mut Criterion) {
    let mut g = c.benchmark_group("List");
    let mut rng = rand::rngs::StdRng::seed_from_u64(4815162342);
    let _logger = Logger::try_with_env().ok().and_then(|l| l.start().ok());
    for q in [64usize, 256, 1024] {
        g.throughput(criterion::Throughput::Elements(q as u64));
        let input_str = format!("N 64 Q {q}");
        let seed = rng.gen();
        g.bench_with_input(BenchmarkId::new("splay", &input_str), &q, |b, &q| {
            bench_list_impl::<Splays>(b, seed, 64, q)
        });
        g.bench_with_input(BenchmarkId::new("treap", &input_str), &q, |b, &q| {
            bench_list_impl::<Treaps>(b, seed, 64, q)
        });
    }
    g.finish();
}

criterion_group!(benches, bench_list);
criterion_main!(benches);
