use crate::error::{Result, SimError};
use crate::global_variables::{
    BASE_SPEED, DEFAULT_START_HEADING, DEFAULT_START_X, DEFAULT_START_Y, DEFAULT_VEHICLE_LENGTH,
    DEFAULT_VEHICLE_WIDTH,
};
use crate::simulation_engine::movement::{
    apply_action, box_center, corners_around, project, Action, Point,
};
use crate::simulation_engine::radar::{sweep, RadarConfig, RadarReading};
use crate::simulation_engine::track::TrackSurface;
use serde::{Deserialize, Serialize};

/// Everything needed to spawn a vehicle at episode start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    pub length: f64,
    pub width: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub heading: f64,
    pub radar: RadarConfig,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            length: DEFAULT_VEHICLE_LENGTH,
            width: DEFAULT_VEHICLE_WIDTH,
            start_x: DEFAULT_START_X,
            start_y: DEFAULT_START_Y,
            heading: DEFAULT_START_HEADING,
            radar: RadarConfig::default(),
        }
    }
}

impl VehicleSpec {
    pub fn validate(&self) -> Result<()> {
        if !(self.length > 0.0) {
            return Err(SimError::InvalidGeometry(format!(
                "length must be positive, got {}",
                self.length
            )));
        }
        if !(self.width > 0.0) {
            return Err(SimError::InvalidGeometry(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        self.radar.validate()
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }
}

/// A single car on the track.
///
/// Corners and radar readings are derived state: they are only ever written by
/// [`Vehicle::update`] and [`Vehicle::sense`]. Once a corner lands on a boundary
/// cell the vehicle is dead and nothing observable changes again.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: usize,
    length: f64,
    width: f64,
    position: Point,
    heading: f64,
    speed: f64,
    center: Point,
    corners: [Point; 4],
    alive: bool,
    radars: Vec<RadarReading>,
    distance_traveled: f64,
    radar: RadarConfig,
}

impl Vehicle {
    /// Spawns a vehicle from `spec`. Fails fast on non-positive geometry.
    pub fn new(id: usize, spec: &VehicleSpec) -> Result<Self> {
        spec.validate()?;
        let position = spec.start();
        let center = box_center(position, spec.length, spec.width);
        Ok(Self {
            id,
            length: spec.length,
            width: spec.width,
            position,
            heading: spec.heading,
            speed: 0.0,
            center,
            corners: corners_around(center, spec.heading, spec.width),
            alive: true,
            radars: Vec::with_capacity(spec.radar.sensor_count()),
            distance_traveled: 0.0,
            radar: spec.radar.clone(),
        })
    }

    /// Advances the vehicle one tick under `action`.
    ///
    /// A dead vehicle is left untouched. The new state is committed only after
    /// every track sample succeeds, so an out-of-bounds error leaves the vehicle
    /// as it was.
    pub fn update(&mut self, action: Action, track: &dyn TrackSurface) -> Result<()> {
        if !self.alive {
            return Ok(());
        }

        let (heading, speed) = apply_action(self.heading, action);
        // Motion always uses the base speed; `speed` is advisory.
        let distance_traveled = self.distance_traveled + BASE_SPEED;
        let center = box_center(self.position, self.length, self.width);
        let position = project(self.position, heading, BASE_SPEED);
        let corners = corners_around(center, heading, self.width);

        let alive = !Self::touches_boundary(&corners, track)?;
        let radars = if alive {
            Some(sweep(track, center, heading, &self.radar)?)
        } else {
            None
        };

        self.heading = heading;
        self.speed = speed;
        self.distance_traveled = distance_traveled;
        self.center = center;
        self.position = position;
        self.corners = corners;
        self.alive = alive;
        match radars {
            Some(radars) => self.radars = radars,
            None => log::debug!(
                "Vehicle {} crashed at ({:.1}, {:.1}) after {} units",
                self.id,
                self.position.x,
                self.position.y,
                self.distance_traveled
            ),
        }
        Ok(())
    }

    /// Recomputes every radar reading from the current center and heading.
    pub fn sense(&mut self, track: &dyn TrackSurface) -> Result<()> {
        if !self.alive {
            return Ok(());
        }
        self.radars = sweep(track, self.center, self.heading, &self.radar)?;
        Ok(())
    }

    /// True when any corner's cell carries the boundary color.
    pub fn check_collision(&self, track: &dyn TrackSurface) -> Result<bool> {
        Self::touches_boundary(&self.corners, track)
    }

    fn touches_boundary(corners: &[Point; 4], track: &dyn TrackSurface) -> Result<bool> {
        for corner in corners {
            let (x, y) = corner.cell();
            if track.is_boundary(x, y)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Radar distances divided by the observation scale, in sensor order.
    /// Before the first sweep this is all zeros, one per configured sensor.
    pub fn observation(&self) -> Vec<f64> {
        if self.radars.is_empty() {
            return vec![0.0; self.radar.sensor_count()];
        }
        self.radars
            .iter()
            .map(|r| r.distance / self.radar.observation_scale)
            .collect()
    }

    /// Distance covered relative to half the vehicle length.
    pub fn fitness_contribution(&self) -> f64 {
        self.distance_traveled / (self.length / 2.0)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn radars(&self) -> &[RadarReading] {
        &self.radars
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation_engine::track::{Color, RasterTrack};

    const WALL: Color = Color(0, 0, 0);
    const ROAD: Color = Color(255, 255, 255);

    fn spec_at(x: f64, y: f64) -> VehicleSpec {
        VehicleSpec {
            start_x: x,
            start_y: y,
            ..VehicleSpec::default()
        }
    }

    #[test]
    fn rejects_non_positive_length() {
        let spec = VehicleSpec {
            length: 0.0,
            ..VehicleSpec::default()
        };
        assert!(matches!(
            Vehicle::new(0, &spec),
            Err(SimError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn observation_defaults_to_zeros() {
        let vehicle = Vehicle::new(0, &VehicleSpec::default()).unwrap();
        assert_eq!(vehicle.observation(), vec![0.0; 5]);
        assert_eq!(vehicle.fitness_contribution(), 0.0);
    }

    #[test]
    fn update_moves_at_base_speed_regardless_of_action() {
        let track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
        let mut vehicle = Vehicle::new(0, &spec_at(370.0, 385.0)).unwrap();
        vehicle.update(Action::SpeedUp, &track).unwrap();
        assert!((vehicle.position().x - 375.0).abs() < 1e-9);
        assert_eq!(vehicle.speed(), 10.0);
        assert_eq!(vehicle.distance_traveled(), BASE_SPEED);
        assert_eq!(vehicle.radars().len(), 5);
        assert!(vehicle.is_alive());
    }

    #[test]
    fn center_is_taken_before_the_advance() {
        let track = RasterTrack::bordered(800, 800, 8, WALL, ROAD).unwrap();
        let mut vehicle = Vehicle::new(0, &spec_at(370.0, 385.0)).unwrap();
        vehicle.update(Action::SlowDown, &track).unwrap();
        assert_eq!(vehicle.center(), Point::new(400.0, 400.0));
    }

    #[test]
    fn failed_update_leaves_vehicle_unchanged() {
        let mut pixels = vec![ROAD; 100 * 100];
        pixels[0] = WALL;
        let track = RasterTrack::from_pixels(100, 100, pixels).unwrap();
        let mut vehicle = Vehicle::new(0, &spec_at(20.0, 35.0)).unwrap();
        let before = vehicle.clone();

        assert!(matches!(
            vehicle.update(Action::TurnLeft, &track),
            Err(SimError::OutOfBounds { .. })
        ));
        assert_eq!(vehicle.position(), before.position());
        assert_eq!(vehicle.heading(), before.heading());
        assert_eq!(vehicle.distance_traveled(), 0.0);
        assert!(vehicle.radars().is_empty());
    }
}
