use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lincode::ecc::generator::MatrixGenerator;
use lincode::ecc::gf2::from_integer;
use lincode::ecc::systematic::build_systematic;
use lincode::ecc::tables::SyndromeTable;
use lincode::{Code, CodeParams, GeneratorOptions};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_matrix_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_generation");
    for &(r, k, d) in &[(4, 3, 3), (8, 4, 5), (10, 6, 5)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("r{}_k{}_d{}", r, k, d)),
            &(r, k, d),
            |b, &(r, k, d)| {
                let mut generator = MatrixGenerator::new(ChaCha20Rng::seed_from_u64(1));
                b.iter(|| generator.generate(black_box(r), black_box(k), black_box(d)))
            },
        );
    }
    group.finish();
}

fn bench_syndrome_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("syndrome_table");
    for &(n, r) in &[(8, 4), (12, 6), (16, 8)] {
        let a = MatrixGenerator::new(ChaCha20Rng::seed_from_u64(2))
            .generate(r, n - r, 3)
            .unwrap();
        let h = build_systematic(&a).unwrap().parity_check;
        group.bench_with_input(BenchmarkId::from_parameter(n), &h, |b, h| {
            b.iter(|| SyndromeTable::build(black_box(h)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let params = CodeParams::new(12, 8, 0.17).unwrap();
    let code = Code::generate(&params, &GeneratorOptions::default().with_seed(3)).unwrap();
    let received = from_integer(0b1010_0110_0101, 12);
    c.bench_function("decode_12_8", |b| b.iter(|| code.decode(black_box(&received))));
}

criterion_group!(
    benches,
    bench_matrix_generation,
    bench_syndrome_table,
    bench_decode
);
criterion_main!(benches);
