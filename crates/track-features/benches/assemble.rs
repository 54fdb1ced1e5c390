use criterion::{black_box, criterion_group, criterion_main, Criterion};
use event_data::{Calorimetry, DataLabels, InMemoryEvent, Particle, Track, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use track_features::{FeatureAssembler, FeatureConfig, SignalConditioner};

fn noisy_dedx(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| match i % 37 {
            0 => 1800.0,
            13 => -4.0,
            _ => 2.0 + (i % 5) as f32 * 0.3,
        })
        .collect()
}

fn track_event(labels: &DataLabels, points: usize) -> InMemoryEvent {
    let directions = (0..points)
        .map(|i| Vec3::new((i as f64 * 0.01).sin(), 0.0, 1.0))
        .collect();
    InMemoryEvent::new()
        .with_particle(&labels.particle, Particle { id: 1, pdg_code: 13, parent: None, daughters: vec![] })
        .with_track(&labels.track, Track { id: 1, particle: 1, directions })
        .with_calorimetry(&labels.calorimetry, Calorimetry { track: 1, dedx: noisy_dedx(points) })
}

fn bench_condition(c: &mut Criterion) {
    let conditioner = SignalConditioner::new(1000.0, 500.0);
    let dedx = noisy_dedx(400);
    c.bench_function("condition_400", |b| {
        b.iter(|| conditioner.conditioned(black_box(&dedx)))
    });
}

fn bench_assemble(c: &mut Criterion) {
    let labels = DataLabels::default();
    let assembler = FeatureAssembler::new(FeatureConfig::default()).expect("default config");
    let short = track_event(&labels, 60);
    let long = track_event(&labels, 400);
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("assemble_padded_60", |b| {
        b.iter(|| assembler.assemble(black_box(&short), 1, &labels, &mut rng))
    });
    c.bench_function("assemble_truncated_400", |b| {
        b.iter(|| assembler.assemble(black_box(&long), 1, &labels, &mut rng))
    });
}

criterion_group!(benches, bench_condition, bench_assemble);
criterion_main!(benches);
