use crate::error::{Result, SimError};
use crate::simulation_engine::movement::Point;
use crate::simulation_engine::radar::RadarReading;
use crate::simulation_engine::simulation::Observer;
use crate::simulation_engine::track::{Color as TrackColor, RasterTrack, TrackSurface};
use crate::simulation_engine::vehicles::Vehicle;
use plotters::prelude::*;
use std::path::Path;

const RADAR_COLOR: RGBColor = RGBColor(180, 30, 30);
const CORNER_COLOR: RGBColor = RGBColor(150, 150, 230);
const CAR_COLOR: RGBColor = RGBColor(40, 90, 200);
const REWARD_COLOR: RGBColor = RGBColor(230, 230, 230);
const HUD_COLOR: RGBColor = RGBColor(20, 20, 20);

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub draw_radar: bool,
    pub draw_reward: bool,
}

#[derive(Debug, Clone)]
struct VehicleSnapshot {
    center: Point,
    corners: [Point; 4],
    radars: Vec<RadarReading>,
    reward: f64,
}

/// Keeps a copy of the latest frame's live vehicles and draws it to a PNG on request.
/// Frames in which every vehicle has crashed are ignored.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    options: RenderOptions,
    vehicles: Vec<VehicleSnapshot>,
    tick: u64,
    num_alive: usize,
}

impl Observer for FrameRenderer {
    fn on_tick(&mut self, tick: u64, vehicles: &[Vehicle], num_alive: usize) {
        // keep the last frame that still had someone driving
        if num_alive == 0 {
            return;
        }
        self.tick = tick;
        self.num_alive = num_alive;
        self.vehicles = vehicles
            .iter()
            .filter(|v| v.is_alive())
            .map(|v| VehicleSnapshot {
                center: v.center(),
                corners: *v.corners(),
                radars: v.radars().to_vec(),
                reward: v.fitness_contribution(),
            })
            .collect();
    }
}

fn to_px(point: Point) -> (i32, i32) {
    (point.x as i32, point.y as i32)
}

fn render_err<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Render(err.to_string())
}

impl FrameRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn num_alive(&self) -> usize {
        self.num_alive
    }

    /// Draws the track, every live vehicle and the `hud` lines into `path`.
    pub fn render_png<P: AsRef<Path>>(&self, track: &RasterTrack, path: P, hud: &[String]) -> Result<()> {
        let (width, height) = track.dimensions();
        let root = BitMapBackend::new(path.as_ref(), (width, height)).into_drawing_area();

        for (i, &TrackColor(r, g, b)) in track.pixels().iter().enumerate() {
            let x = (i % width as usize) as i32;
            let y = (i / width as usize) as i32;
            root.draw_pixel((x, y), &RGBColor(r, g, b))
                .map_err(render_err)?;
        }

        for vehicle in &self.vehicles {
            if self.options.draw_radar {
                for radar in &vehicle.radars {
                    root.draw(&PathElement::new(
                        vec![to_px(vehicle.center), to_px(radar.endpoint)],
                        RADAR_COLOR.stroke_width(1),
                    ))
                    .map_err(render_err)?;
                    root.draw(&Circle::new(to_px(radar.endpoint), 2, RADAR_COLOR.filled()))
                        .map_err(render_err)?;
                }
                for corner in &vehicle.corners {
                    root.draw(&Circle::new(to_px(*corner), 1, CORNER_COLOR.filled()))
                        .map_err(render_err)?;
                }
            }

            let outline: Vec<(i32, i32)> = vehicle.corners.iter().map(|c| to_px(*c)).collect();
            root.draw(&Polygon::new(outline, CAR_COLOR.filled()))
                .map_err(render_err)?;

            if self.options.draw_reward {
                root.draw(&Text::new(
                    format!("{}", vehicle.reward as i64),
                    to_px(vehicle.corners[1]),
                    ("sans-serif", 14).into_font().color(&REWARD_COLOR),
                ))
                .map_err(render_err)?;
            }
        }

        let mut y = 20;
        for line in hud {
            root.draw(&Text::new(
                line.as_str(),
                (20, y),
                ("sans-serif", 20).into_font().color(&HUD_COLOR),
            ))
            .map_err(render_err)?;
            y += 22;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}
