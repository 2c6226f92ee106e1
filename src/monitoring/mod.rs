pub mod frame_renderer;
pub mod generation_log;

pub use frame_renderer::{FrameRenderer, RenderOptions};
pub use generation_log::GenerationLog;
