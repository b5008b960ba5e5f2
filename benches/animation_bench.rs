use std::hint::black_box;

use countup::animation::{AnimationRun, CountValue};
use countup::page::{Document, Page, Rect, Viewport};
use countup::util::easing::EasingFunction;
use countup::Options;
use criterion::{criterion_group, criterion_main, Criterion};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuadraticOut;
    c.bench_function("quadratic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn run_step_benchmark(c: &mut Criterion) {
    c.bench_function("animation_run_step", |b| {
        b.iter(|| {
            let mut run = AnimationRun::new(
                CountValue::Value(150),
                2000.0,
                EasingFunction::QuadraticOut,
            );
            let _ = run.step(0.0);
            black_box(run.step(black_box(1000.0)))
        })
    });
}

fn page_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_frame");

    for count in [10, 100, 1000] {
        group.bench_function(format!("{count}_counters"), |b| {
            b.iter_batched(
                || {
                    let mut doc = Document::new();
                    for i in 0..count {
                        let _ = doc.create_element(
                            "span",
                            &["b-stat-card__value"],
                            &[("data-target", "150")],
                            Rect::new(0.0, f64::from(i) * 10.0, 300.0, 10.0),
                        );
                    }
                    let mut page =
                        Page::new(doc, Viewport::new(1280.0, 1e9), &Options::default())
                            .expect("default options are valid");
                    let _ = page.start();
                    page.frame(0.0);
                    page
                },
                |mut page| {
                    page.frame(16.0);
                    page.frame(1016.0);
                    black_box(page)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    run_step_benchmark,
    page_frame_benchmark
);
criterion_main!(benches);
