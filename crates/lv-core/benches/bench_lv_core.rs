use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lv_core::{Preset, Settings, Step};

fn bench_presets(c: &mut Criterion) {
    c.bench_function("apply_all_presets", |b| {
        b.iter(|| {
            let mut s = Settings::default();
            for preset in Preset::ALL {
                s.apply_preset(black_box(preset));
            }
            black_box(s)
        })
    });

    c.bench_function("toggle_every_step", |b| {
        b.iter(|| {
            let mut s = Settings::with_preset(Preset::Maximum);
            for step in Step::ALL {
                s.set_step(black_box(step), false);
            }
            black_box(s)
        })
    });
}

fn bench_settings_json(c: &mut Criterion) {
    let json = serde_json::to_string(&Settings::with_preset(Preset::Strong)).unwrap();
    c.bench_function("settings_from_json", |b| {
        b.iter(|| black_box(serde_json::from_str::<Settings>(black_box(&json)).unwrap()))
    });
}

criterion_group!(benches, bench_presets, bench_settings_json);
criterion_main!(benches);
