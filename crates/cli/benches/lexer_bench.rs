use criterion::{criterion_group, criterion_main, Criterion};
use lexer::{tokenize, Dialect};

const N: usize = 10_000;

fn sample(n: usize) -> Vec<u8> {
    let mut buf = String::from("# generated\n\n");
    for i in 0..n {
        match i % 3 {
            0 => buf.push_str(&format!("int_{} {}\n", i, i)),
            1 => buf.push_str(&format!("float_{} {}.5 # inline\n", i, i)),
            _ => buf.push_str(&format!("str_{} \"value \\\"{}\\\"\"\n", i, i)),
        }
    }
    buf.into_bytes()
}

fn lexer_tokenize(c: &mut Criterion) {
    let buf = sample(N);
    c.bench_function("lexer_tokenize_10k", |b| {
        b.iter(|| {
            let count = tokenize(&buf, Dialect::Permissive).count();
            assert_eq!(count, N);
        });
    });
}

fn lexer_tokenize_and_unescape(c: &mut Criterion) {
    let buf = sample(N);
    c.bench_function("lexer_tokenize_unescape_10k", |b| {
        b.iter(|| {
            for t in tokenize(&buf, Dialect::Strict) {
                criterion::black_box(t.text());
            }
        });
    });
}

criterion_group!(benches, lexer_tokenize, lexer_tokenize_and_unescape);
criterion_main!(benches);
