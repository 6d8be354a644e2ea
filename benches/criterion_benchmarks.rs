use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spcfile::spc::{self, HEADER_SIZE, Header, SpcFile, SubHeader, linear_space};

const SIZES: [usize; 3] = [1024, 16 * 1024, 256 * 1024];

fn gen_spectrum(n: usize, seed: u64) -> SpcFile {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = linear_space(200.0, 3200.0, n, true);
    let y: Vec<f32> = (0..n).map(|_| rng.random_range(-1000.0f32..1000.0)).collect();
    SpcFile::from_xy(x, y).unwrap()
}

/// Integer-scaled file with generated X, the common instrument layout.
fn gen_scaled_bytes(n: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let header = Header {
        point_count: n as i32,
        first_x: 200.0,
        last_x: 3200.0,
        exponent: 20,
        ..Default::default()
    };
    let mut buf = Vec::with_capacity(HEADER_SIZE + 32 + n * 4);
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(&SubHeader::default().encode());
    for _ in 0..n {
        let v: i32 = rng.random_range(-(1 << 24)..(1 << 24));
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf
}

fn bench_decode_float(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode_float_xy");
    for n in SIZES {
        let bytes = spc::encode(&gen_spectrum(n, 1)).unwrap();
        g.throughput(Throughput::Bytes(bytes.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let file = spc::decode(black_box(&bytes)).unwrap();
                black_box(file);
            });
        });
    }
    g.finish();
}

fn bench_decode_scaled(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode_scaled_generated_x");
    for n in SIZES {
        let bytes = gen_scaled_bytes(n, 2);
        g.throughput(Throughput::Bytes(bytes.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let file = spc::decode(black_box(&bytes)).unwrap();
                black_box(file);
            });
        });
    }
    g.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode_float_xy");
    for n in SIZES {
        let file = gen_spectrum(n, 3);
        g.throughput(Throughput::Bytes(spc::encoded_len(&file) as u64));
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let bytes = spc::encode(black_box(&file)).unwrap();
                black_box(bytes);
            });
        });
    }
    g.finish();
}

fn bench_linear_space(c: &mut Criterion) {
    let mut g = c.benchmark_group("linear_space");
    for n in SIZES {
        g.throughput(Throughput::Elements(n as u64));
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(linear_space(black_box(0.0), black_box(4000.0), n, true)));
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_decode_float,
    bench_decode_scaled,
    bench_encode,
    bench_linear_space
);
criterion_main!(benches);
