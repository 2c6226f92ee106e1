// simulation_engine/mod.rs
pub mod movement;
pub mod radar;
pub mod simulation;
pub mod track;
pub mod vehicles;

pub use movement::{Action, Point};
pub use radar::{RadarConfig, RadarReading};
pub use simulation::{
    EpisodeBudget, EpisodeState, EpisodeSummary, Observer, Termination, TickReport, VehicleBatch,
};
pub use track::{Color, RasterTrack, TrackSurface};
pub use vehicles::{Vehicle, VehicleSpec};
