// benches/bench_batch_tick.rs

use ai_car_sim::simulation_engine::movement::Action;
use ai_car_sim::simulation_engine::simulation::VehicleBatch;
use ai_car_sim::simulation_engine::track::{Color, RasterTrack};
use ai_car_sim::simulation_engine::vehicles::VehicleSpec;
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use std::time::Duration;

fn bench_batch_tick(c: &mut Criterion) {
    let track =
        RasterTrack::bordered(1920, 1080, 8, Color(255, 255, 255), Color(70, 70, 70)).unwrap();
    let spec = VehicleSpec {
        start_x: 930.0,
        start_y: 525.0,
        ..VehicleSpec::default()
    };

    let mut group = c.benchmark_group("batch_tick");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    group.measurement_time(Duration::from_secs(10));

    for &size in &[10usize, 30, 100, 300] {
        let actions = vec![Action::TurnLeft; size];

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| {
                let mut batch = VehicleBatch::spawn(size, &spec).unwrap();
                for _ in 0..60 {
                    black_box(batch.tick(&actions, &track).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, &size| {
            b.iter(|| {
                let mut batch = VehicleBatch::spawn(size, &spec).unwrap();
                for _ in 0..60 {
                    black_box(batch.tick_parallel(&actions, &track).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_tick);
criterion_main!(benches);
