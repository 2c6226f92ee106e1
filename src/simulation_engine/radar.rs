use crate::error::{Result, SimError};
use crate::global_variables::{
    DEFAULT_RADAR_OFFSETS, OBSERVATION_SCALE, RADAR_MAX_RANGE, RADAR_STEP,
};
use crate::simulation_engine::movement::{project, Point};
use crate::simulation_engine::track::TrackSurface;
use serde::{Deserialize, Serialize};

/// Radar layout shared by every vehicle built from the same spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Angular offsets from heading, in degrees. Readings follow this order.
    pub offsets: Vec<f64>,
    /// Ray growth per step.
    pub step: f64,
    /// Longest ray before giving up.
    pub max_range: f64,
    /// Divisor applied to distances when building an observation.
    pub observation_scale: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            offsets: DEFAULT_RADAR_OFFSETS.to_vec(),
            step: RADAR_STEP,
            max_range: RADAR_MAX_RANGE,
            observation_scale: OBSERVATION_SCALE,
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.step > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "radar step must be positive, got {}",
                self.step
            )));
        }
        if !(self.max_range >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "radar range must not be negative, got {}",
                self.max_range
            )));
        }
        if !(self.observation_scale > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "observation scale must be positive, got {}",
                self.observation_scale
            )));
        }
        Ok(())
    }

    pub fn sensor_count(&self) -> usize {
        self.offsets.len()
    }
}

/// One sensor result: where the ray stopped and how far that is from the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarReading {
    pub offset: f64,
    pub endpoint: Point,
    pub distance: f64,
}

/// Casts a single ray from `center` at `heading + offset`.
///
/// The ray grows by `config.step` from length 0 until its cell carries the
/// boundary color or the length reaches `config.max_range`.
pub fn cast_ray(
    track: &dyn TrackSurface,
    center: Point,
    heading: f64,
    offset: f64,
    config: &RadarConfig,
) -> Result<RadarReading> {
    let angle = heading + offset;
    let boundary = track.boundary_color();
    let mut length = 0.0;
    let mut endpoint = project(center, angle, length);
    loop {
        let (x, y) = endpoint.cell();
        if track.classify(x, y)? == boundary || length >= config.max_range {
            break;
        }
        length = (length + config.step).min(config.max_range);
        endpoint = project(center, angle, length);
    }
    Ok(RadarReading {
        offset,
        endpoint,
        distance: length,
    })
}

/// Casts every configured ray, in configured order.
pub fn sweep(
    track: &dyn TrackSurface,
    center: Point,
    heading: f64,
    config: &RadarConfig,
) -> Result<Vec<RadarReading>> {
    config
        .offsets
        .iter()
        .map(|&offset| cast_ray(track, center, heading, offset, config))
        .collect()
}
