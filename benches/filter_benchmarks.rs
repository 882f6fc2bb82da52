//! Benchmarks for gesture signal smoothing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_particle_morph::{
    config::GestureSettings,
    constants::{FINGERTIP_INDICES, NUM_HAND_LANDMARKS},
    filters::{exponential::ExponentialFilter, NoFilter, SignalFilter},
    gesture::GestureProcessor,
    landmarks::Landmark,
};

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    // Noisy openness readings
    let test_data: Vec<f32> = (0..100)
        .map(|i| {
            let t = i as f32 * 0.1;
            0.5 + 0.4 * t.sin() + 0.05 * rand::random::<f32>()
        })
        .collect();

    let filter_configs = vec![
        ("no_filter", Box::new(NoFilter::default()) as Box<dyn SignalFilter>),
        ("exponential_0.2", Box::new(ExponentialFilter::new(0.2))),
        ("exponential_0.5", Box::new(ExponentialFilter::new(0.5))),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_with_input(BenchmarkId::new("single_update", name), &test_data[0], |b, &v| {
            b.iter(|| black_box(filter.apply(black_box(v))));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &test_data, |b, data| {
            b.iter(|| {
                filter.reset();
                for &v in data {
                    black_box(filter.apply(black_box(v)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_gesture_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");

    let hands: Vec<Vec<Landmark>> = (0..60)
        .map(|i| {
            let reach = 0.05 + 0.3 * (i as f32 / 60.0);
            let mut points = vec![Landmark::new(0.5, 0.6, 0.0); NUM_HAND_LANDMARKS];
            for &tip in &FINGERTIP_INDICES {
                points[tip] = Landmark::new(0.5, 0.6 - reach, 0.0);
            }
            points
        })
        .collect();

    group.bench_function("update_60_frames", |b| {
        let mut processor = GestureProcessor::new(&GestureSettings::default()).unwrap();
        b.iter(|| {
            for hand in &hands {
                black_box(processor.update(Some(hand.as_slice())));
            }
        });
    });

    group.bench_function("tracking_lost", |b| {
        let mut processor = GestureProcessor::new(&GestureSettings::default()).unwrap();
        b.iter(|| black_box(processor.update(None)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_filters, benchmark_gesture_update);
criterion_main!(benches);
