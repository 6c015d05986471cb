use chordtile::models::{ModifierMask, RawKeyEvent, RecognizedKey, ScreenSize};
use chordtile::services::{geometry, placement, KeyEventFilter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_resolve_and_frame(c: &mut Criterion) {
    let screen = ScreenSize::new(1728.0, 1079.0);
    let keys = [
        RecognizedKey::ArrowLeft,
        RecognizedKey::ArrowRight,
        RecognizedKey::ArrowUp,
        RecognizedKey::ArrowDown,
        RecognizedKey::Return,
    ];

    c.bench_function("resolve_and_frame", |b| {
        b.iter(|| {
            for key in keys {
                for escalated in [false, true] {
                    let position = placement::resolve(black_box(key), black_box(escalated));
                    black_box(geometry::frame_for(position, screen));
                }
            }
        })
    });
}

fn benchmark_event_classification(c: &mut Criterion) {
    let filter = KeyEventFilter::new();
    let chord = RawKeyEvent::new(
        123,
        ModifierMask::default()
            .with(ModifierMask::CONTROL)
            .with(ModifierMask::OPTION),
        false,
    );
    let plain = RawKeyEvent::new(0, ModifierMask::default(), false);

    c.bench_function("event_classification", |b| {
        b.iter(|| {
            black_box(filter.classify(black_box(&chord)));
            black_box(filter.classify(black_box(&plain)));
        })
    });
}

criterion_group!(
    benches,
    benchmark_resolve_and_frame,
    benchmark_event_classification
);
criterion_main!(benches);
