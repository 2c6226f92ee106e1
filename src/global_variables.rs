// Motion model
pub const BASE_SPEED: f64 = 5.0;
pub const TURN_STEP_DEGREES: f64 = 5.0;
pub const SPEED_STEP: f64 = 5.0;
pub const MIN_SPEED: f64 = 10.0;

// Vehicle geometry
pub const DEFAULT_VEHICLE_LENGTH: f64 = 60.0;
pub const DEFAULT_VEHICLE_WIDTH: f64 = 30.0;
pub const DEFAULT_START_X: f64 = 860.0;
pub const DEFAULT_START_Y: f64 = 910.0;
pub const DEFAULT_START_HEADING: f64 = 0.0;

/// Corner offsets from heading, in order front-left, back-left, back-right, front-right.
pub const CORNER_OFFSETS_DEGREES: [f64; 4] = [30.0, 150.0, 210.0, 330.0];

// Radar
pub const DEFAULT_RADAR_OFFSETS: [f64; 5] = [-90.0, -45.0, 0.0, 45.0, 90.0];
pub const RADAR_STEP: f64 = 5.0;
pub const RADAR_MAX_RANGE: f64 = 300.0;
pub const OBSERVATION_SCALE: f64 = 30.0;

// Track
/// Thicker than a radar step and than a default corner's travel in one tick
/// (base speed plus the turn chord at radius 30).
pub const MIN_BORDER_THICKNESS: u32 = 8;

// Episode
pub const FRAMES_PER_SECOND: u64 = 60;
pub const EPISODE_SECONDS: u64 = 20;
pub const DEFAULT_MAX_TICKS: u64 = FRAMES_PER_SECOND * EPISODE_SECONDS;
pub const DEFAULT_MAX_GENERATIONS: u32 = 20;

// Default file locations
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";
pub const DEFAULT_TRACK_PATH: &str = "./images/track.png";
pub const DEFAULT_GENERATION_LOG: &str = "generations.csv";
