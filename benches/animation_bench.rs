use criterion::{criterion_group, criterion_main, Criterion, black_box};
use glam::Vec3;
use scrollstage::animation::{Transition, TransitionAnimator};
use scrollstage::input::InputEvent;
use scrollstage::util::easing::EasingFunction;
use scrollstage::util::frame_timing::FrameTick;
use scrollstage::{Options, Pose, ScrollStory};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicOut;
    c.bench_function("cubic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn animator_tick_benchmark(c: &mut Criterion) {
    let start = Pose::default();
    let target = Pose::from_degrees(Vec3::new(2.4, -0.6, 7.5), Vec3::new(35.0, 60.0, -10.0), 18000.0);

    c.bench_function("animator_tick_and_compose", |b| {
        b.iter_batched(
            || {
                let mut animator = TransitionAnimator::new(start, Transition::smooth(1.2), 3.0);
                let _ = animator.run(start, target);
                animator
            },
            |mut animator| {
                for _ in 0..72 {
                    animator.tick(1.0 / 60.0, &mut |_: f32| {});
                    black_box(animator.compose(Vec3::new(0.1, -0.05, 0.0), 1.0 / 60.0));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn story_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("story_frame");
    let options = Options::default();

    group.bench_function("settled", |b| {
        let mut story = ScrollStory::new(&options);
        let _ = story.handle_input(&InputEvent::PointerEntered);
        let _ = story.handle_input(&InputEvent::PointerMoved { x: 600.0, y: 200.0 });
        let mut elapsed = 0.0;
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            story.update(FrameTick { elapsed, delta: 1.0 / 60.0 });
            black_box(story.model().to_array())
        })
    });

    group.bench_function("full_walk", |b| {
        b.iter(|| {
            let mut story = ScrollStory::new(&options);
            let mut elapsed = 0.0;
            for _ in 0..4 {
                let _ = story.handle_input(&InputEvent::Wheel {
                    delta_y: 120.0,
                    mode: scrollstage::DeltaMode::Pixel,
                });
                for _ in 0..80 {
                    elapsed += 1.0 / 60.0;
                    story.update(FrameTick { elapsed, delta: 1.0 / 60.0 });
                }
            }
            black_box(story.current_stage())
        })
    });
    group.finish();
}

criterion_group!(benches, easing_benchmark, animator_tick_benchmark, story_frame_benchmark);
criterion_main!(benches);
