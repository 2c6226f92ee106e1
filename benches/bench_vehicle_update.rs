// benches/bench_vehicle_update.rs

use ai_car_sim::simulation_engine::movement::Action;
use ai_car_sim::simulation_engine::track::{Color, RasterTrack};
use ai_car_sim::simulation_engine::vehicles::{Vehicle, VehicleSpec};
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};

fn arena() -> RasterTrack {
    RasterTrack::bordered(1920, 1080, 8, Color(255, 255, 255), Color(70, 70, 70)).unwrap()
}

fn bench_vehicle_update(c: &mut Criterion) {
    let track = arena();
    let spec = VehicleSpec {
        start_x: 930.0,
        start_y: 525.0,
        ..VehicleSpec::default()
    };

    let mut group = c.benchmark_group("vehicle_update");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    // a constant left turn keeps the car circling in the middle of the arena
    for &ticks in &[1usize, 60, 600] {
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &ticks, |b, &ticks| {
            b.iter(|| {
                let mut vehicle = Vehicle::new(0, &spec).unwrap();
                for _ in 0..ticks {
                    vehicle.update(Action::TurnLeft, &track).unwrap();
                }
                black_box(vehicle.fitness_contribution());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_vehicle_update);
criterion_main!(benches);
