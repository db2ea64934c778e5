use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lv_core::{Preset, Settings};
use lv_obfuscator::tokens::TokenGenerator;
use lv_obfuscator::{format, Pipeline};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generate_source(size_kb: usize) -> String {
    let base = "local function greet(name)\n  -- say hello\n  local msg = \"Hello, \" .. name .. \"!\"\n  for i = 1, 3 do\n    print(msg, i * 42)\n  end\n  return #msg\nend\nlocal total = greet('world') + 100\n";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text
}

fn bench_presets(c: &mut Criterion) {
    let src_1k = generate_source(1);
    let src_10k = generate_source(10);
    let pipeline = Pipeline::new();

    for preset in [Preset::Minify, Preset::Medium, Preset::Maximum] {
        let settings = Settings::with_preset(preset);
        c.bench_function(&format!("run_{preset}_1kb"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&src_1k), &settings, StdRng::seed_from_u64(1))))
        });
        c.bench_function(&format!("run_{preset}_10kb"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&src_10k), &settings, StdRng::seed_from_u64(1))))
        });
    }
}

fn bench_normalize(c: &mut Criterion) {
    let src = generate_source(100);
    c.bench_function("normalize_100kb", |b| {
        b.iter(|| black_box(format::normalize(black_box(&src))))
    });
}

fn bench_tokens(c: &mut Criterion) {
    let mut tokens = TokenGenerator::new(StdRng::seed_from_u64(7));
    c.bench_function("numeric_expression_1000", |b| {
        b.iter(|| {
            for n in 1..1000 {
                black_box(tokens.numeric_expression(n));
            }
        })
    });
}

criterion_group!(benches, bench_presets, bench_normalize, bench_tokens);
criterion_main!(benches);
