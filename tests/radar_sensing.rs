use ai_car_sim::simulation_engine::radar::RadarConfig;
use ai_car_sim::simulation_engine::track::{Color, RasterTrack, TrackSurface};
use ai_car_sim::simulation_engine::vehicles::{Vehicle, VehicleSpec};
use ai_car_sim::SimError;
use proptest::prelude::*;

const WALL: Color = Color(10, 10, 10);
const ROAD: Color = Color(200, 200, 200);

fn spec_centered_on(cx: f64, cy: f64, heading: f64) -> VehicleSpec {
    let defaults = VehicleSpec::default();
    VehicleSpec {
        start_x: cx - defaults.length / 2.0,
        start_y: cy - defaults.width / 2.0,
        heading,
        ..defaults
    }
}

#[test]
fn observation_is_zero_before_first_sweep() {
    let vehicle = Vehicle::new(0, &VehicleSpec::default()).unwrap();
    assert_eq!(vehicle.observation(), vec![0.0; 5]);

    let spec = VehicleSpec {
        radar: RadarConfig {
            offsets: vec![-30.0, 0.0, 30.0],
            ..RadarConfig::default()
        },
        ..VehicleSpec::default()
    };
    let vehicle = Vehicle::new(0, &spec).unwrap();
    assert_eq!(vehicle.observation(), vec![0.0; 3]);
}

#[test]
fn wall_ahead_is_reported_per_sensor() {
    let mut track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
    track.paint_rect(550, 0, 10, 800, WALL);
    let mut vehicle = Vehicle::new(0, &spec_centered_on(400.0, 400.0, 0.0)).unwrap();
    vehicle.sense(&track).unwrap();

    let distances: Vec<f64> = vehicle.radars().iter().map(|r| r.distance).collect();
    assert_eq!(distances, vec![300.0, 215.0, 150.0, 215.0, 300.0]);

    let expected = [10.0, 215.0 / 30.0, 5.0, 215.0 / 30.0, 10.0];
    for (got, want) in vehicle.observation().iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }
}

#[test]
fn sensors_follow_the_configured_order() {
    let track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
    let mut vehicle = Vehicle::new(0, &spec_centered_on(400.0, 400.0, 30.0)).unwrap();
    vehicle.sense(&track).unwrap();
    let offsets: Vec<f64> = vehicle.radars().iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![-90.0, -45.0, 0.0, 45.0, 90.0]);
}

#[test]
fn ray_leaving_the_image_is_an_error() {
    // no border: the 300 unit ray runs off a 200x200 image
    let mut pixels = vec![ROAD; 200 * 200];
    pixels[0] = WALL;
    let track = RasterTrack::from_pixels(200, 200, pixels).unwrap();
    assert_eq!(track.boundary_color(), WALL);

    let mut vehicle = Vehicle::new(0, &spec_centered_on(100.0, 100.0, 0.0)).unwrap();
    assert!(matches!(
        vehicle.sense(&track),
        Err(SimError::OutOfBounds { .. })
    ));
}

#[test]
fn failed_update_leaves_vehicle_untouched() {
    let mut pixels = vec![ROAD; 200 * 200];
    pixels[0] = WALL;
    let track = RasterTrack::from_pixels(200, 200, pixels).unwrap();
    let mut vehicle = Vehicle::new(0, &spec_centered_on(100.0, 100.0, 0.0)).unwrap();
    let before = (vehicle.position(), vehicle.heading(), vehicle.distance_traveled());

    let result = vehicle.update(ai_car_sim::simulation_engine::movement::Action::TurnLeft, &track);
    assert!(result.is_err());
    assert_eq!(
        (vehicle.position(), vehicle.heading(), vehicle.distance_traveled()),
        before
    );
    assert!(vehicle.is_alive());
}

proptest! {
    #[test]
    fn readings_stay_within_range(
        heading in -720.0f64..720.0,
        cx in 350.0f64..450.0,
        cy in 350.0f64..450.0,
        wx in 0u32..800,
        wy in 0u32..800,
        ww in 1u32..200,
        wh in 1u32..200,
    ) {
        let mut track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
        track.paint_rect(wx, wy, ww, wh, WALL);
        let mut vehicle = Vehicle::new(0, &spec_centered_on(cx, cy, heading)).unwrap();
        vehicle.sense(&track).unwrap();

        prop_assert_eq!(vehicle.radars().len(), 5);
        for reading in vehicle.radars() {
            prop_assert!(reading.distance >= 0.0 && reading.distance <= 300.0);
        }
        for value in vehicle.observation() {
            prop_assert!((0.0..=10.0).contains(&value));
        }
    }

    #[test]
    fn open_road_reads_exactly_max_range(
        heading in -360.0f64..360.0,
        cx in 350.0f64..450.0,
        cy in 350.0f64..450.0,
    ) {
        let track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
        let mut vehicle = Vehicle::new(0, &spec_centered_on(cx, cy, heading)).unwrap();
        vehicle.sense(&track).unwrap();
        for reading in vehicle.radars() {
            prop_assert_eq!(reading.distance, 300.0);
        }
    }
}
