use crate::error::{Result, SimError};
use crate::global_variables::MIN_BORDER_THICKNESS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An opaque RGB track color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
}

/// Read-only raster the engine queries to tell drivable cells from boundary cells.
pub trait TrackSurface: Sync {
    /// Width and height in cells.
    fn dimensions(&self) -> (u32, u32);

    /// Returns the color of the cell at `(x, y)`. Coordinates outside the surface are an error.
    fn classify(&self, x: i64, y: i64) -> Result<Color>;

    /// The boundary color, sampled once at (0, 0).
    fn boundary_color(&self) -> Color;

    /// True when the cell at `(x, y)` carries the boundary color.
    fn is_boundary(&self, x: i64, y: i64) -> Result<bool> {
        Ok(self.classify(x, y)? == self.boundary_color())
    }
}

/// A row-major pixel grid.
#[derive(Debug, Clone)]
pub struct RasterTrack {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    boundary: Color,
}

impl RasterTrack {
    /// Builds a track from row-major pixels. The pixel at (0, 0) defines the boundary color.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidTrack(format!(
                "surface must be non-empty, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SimError::InvalidTrack(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        let boundary = pixels[0];
        Ok(Self {
            width,
            height,
            pixels,
            boundary,
        })
    }

    /// Loads a track image from disk. Alpha is discarded.
    pub fn from_image<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| Color(p[0], p[1], p[2])).collect();
        let track = Self::from_pixels(width, height, pixels)?;
        log::info!(
            "Loaded track {} ({}x{}), boundary color {:?}",
            path.as_ref().display(),
            width,
            height,
            track.boundary
        );
        Ok(track)
    }

    /// A surface of a single color. Every cell is boundary until something else is painted.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        Self::from_pixels(width, height, vec![color; width as usize * height as usize])
    }

    /// A `road` surface framed by a `wall` border `thickness` cells wide.
    ///
    /// The border must be at least [`MIN_BORDER_THICKNESS`] cells so that no
    /// radar step or corner move can jump over it and sample off the image.
    pub fn bordered(width: u32, height: u32, thickness: u32, wall: Color, road: Color) -> Result<Self> {
        if thickness < MIN_BORDER_THICKNESS {
            return Err(SimError::InvalidTrack(format!(
                "border must be at least {} cells thick, got {}",
                MIN_BORDER_THICKNESS, thickness
            )));
        }
        if wall == road {
            return Err(SimError::InvalidTrack(
                "wall color must differ from the road".to_string(),
            ));
        }
        let mut track = Self::filled(width, height, wall)?;
        if width > 2 * thickness && height > 2 * thickness {
            track.paint_rect(
                thickness,
                thickness,
                width - 2 * thickness,
                height - 2 * thickness,
                road,
            );
        }
        Ok(track)
    }

    /// Paints one cell. Out-of-range cells are ignored; the boundary color is never re-sampled.
    pub fn paint(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = color;
        }
    }

    /// Paints an axis-aligned rectangle, clipped to the surface.
    pub fn paint_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let index = self.index(col, row);
                self.pixels[index] = color;
            }
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl TrackSurface for RasterTrack {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn classify(&self, x: i64, y: i64) -> Result<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.pixels[self.index(x as u32, y as u32)])
    }

    fn boundary_color(&self) -> Color {
        self.boundary
    }
}
