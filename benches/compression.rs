//! A benchmark for the compression backends.

use pai::compression::{compress, decompress, Method};
use pai::Context;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn get_document(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        if i > 0 {
            text.push('&');
        }
        text += &format!("{:02x}ff00:{}@000000:3x{}", i % 256, i + 1, i % 5 + 2);
    }
    text
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let text = get_document(2_000);

    for method in Method::ALL {
        for quality in [1, 6, 11] {
            let ctx = Context::new(quality);
            let name = format!("compress_{}_q{}", method.name(), quality);
            c.bench_function(&name, |b| {
                b.iter(|| black_box(compress(&text, &ctx, method).unwrap()))
            });
        }

        let compressed = compress(&text, &Context::default(), method).unwrap();
        let name = format!("decompress_{}", method.name());
        c.bench_function(&name, |b| {
            b.iter(|| black_box(decompress(&compressed, method).unwrap()))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
