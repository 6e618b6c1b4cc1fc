//! CPU raster surface implementing [`Canvas2DSurface`]
//!
//! Pixels are stored as straight-alpha `[r, g, b, a]` f32 values. Path
//! commands are buffered and only rasterized on `fill`, using the nonzero
//! winding rule sampled at pixel centres, so overlapping discs of one
//! curve segment are painted exactly once.

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::{debug, warn};

use crate::canvas::Canvas2DSurface;

/// Upper bound on the chords used to flatten a single arc
const MAX_ARC_SEGMENTS: usize = 128;

/// Lower bound on the chords used to flatten a single arc
const MIN_ARC_SEGMENTS: usize = 8;

/// An RGBA CPU surface
pub struct CpuSurface {
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<[f32; 4]>,
    fill_color: [f32; 4],
    /// Closed or open subpaths of the path being built
    subpaths: Vec<Vec<DVec2>>,
    /// Whether the last subpath still accepts points
    subpath_open: bool,
}

impl CpuSurface {
    /// Create a new surface, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
            fill_color: [0.0, 0.0, 0.0, 1.0],
            subpaths: Vec::new(),
            subpath_open: false,
        }
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Composite `color` over an existing pixel (source-over)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3];
        let dst_alpha = dst[3] * (1.0 - src_alpha);
        let out_alpha = src_alpha + dst_alpha;

        self.pixels[index] = if out_alpha <= 0.0 {
            [0.0, 0.0, 0.0, 0.0]
        } else {
            [
                (color[0] * src_alpha + dst[0] * dst_alpha) / out_alpha,
                (color[1] * src_alpha + dst[1] * dst_alpha) / out_alpha,
                (color[2] * src_alpha + dst[2] * dst_alpha) / out_alpha,
                out_alpha,
            ]
        };
    }

    /// Current fill colour as parsed from the last valid fill style
    pub fn fill_color(&self) -> [f32; 4] {
        self.fill_color
    }

    /// Number of pixels with any coverage
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0.0).count()
    }

    /// Get raw pixel data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    fn current_subpath(&mut self) -> Option<&mut Vec<DVec2>> {
        if self.subpath_open {
            self.subpaths.last_mut()
        } else {
            None
        }
    }

    fn start_subpath(&mut self, at: DVec2) {
        self.subpaths.push(vec![at]);
        self.subpath_open = true;
    }

    fn push_point(&mut self, at: DVec2) {
        match self.current_subpath() {
            Some(subpath) => subpath.push(at),
            None => self.start_subpath(at),
        }
    }

    /// Pixel span `[start, end)` whose centres fall inside `[lo, hi)`
    fn pixel_span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
        let start = (lo - 0.5).ceil().max(0.0).min(limit as f64) as u32;
        let end = (hi - 0.5).ceil().max(0.0).min(limit as f64) as u32;
        (start, end)
    }

    /// Rasterize the buffered path with the nonzero winding rule
    fn fill_path(&mut self) -> usize {
        let edges: Vec<(DVec2, DVec2)> = self
            .subpaths
            .iter()
            .filter(|s| s.len() >= 2)
            .flat_map(|s| {
                s.iter()
                    .zip(s.iter().cycle().skip(1))
                    .map(|(a, b)| (*a, *b))
                    .take(s.len())
            })
            .collect();

        if edges.is_empty() {
            return 0;
        }

        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.y).min(b.y), hi.max(a.y).max(b.y))
        });
        let (row_start, row_end) = Self::pixel_span(min_y, max_y, self.height);

        let color = self.fill_color;
        let mut painted = 0;
        let mut crossings: Vec<(f64, i32)> = Vec::new();

        for py in row_start..row_end {
            let sy = py as f64 + 0.5;
            crossings.clear();

            for (a, b) in &edges {
                if (a.y <= sy) != (b.y <= sy) {
                    let x = a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y);
                    let direction = if b.y > a.y { 1 } else { -1 };
                    crossings.push((x, direction));
                }
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let (col_start, col_end) = Self::pixel_span(pair[0].0, pair[1].0, self.width);
                for px in col_start..col_end {
                    self.blend_pixel(px, py, color);
                    painted += 1;
                }
            }
        }

        painted
    }

    fn rect_pixels(&self, x: f64, y: f64, width: f64, height: f64) -> ((u32, u32), (u32, u32)) {
        let (x0, x1) = (x.min(x + width), x.max(x + width));
        let (y0, y1) = (y.min(y + height), y.max(y + height));
        (
            Self::pixel_span(x0, x1, self.width),
            Self::pixel_span(y0, y1, self.height),
        )
    }
}

impl Canvas2DSurface for CpuSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn set_fill_style(&mut self, style: &str) {
        match csscolorparser::parse(style) {
            Ok(color) => {
                let [r, g, b, a] = color.to_array();
                self.fill_color = [r as f32, g as f32, b as f32, a as f32];
            }
            Err(err) => warn!("CpuSurface: ignoring fill style {:?}: {}", style, err),
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
        self.subpath_open = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.start_subpath(DVec2::new(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(DVec2::new(x, y));
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }

        let sweep = if anticlockwise {
            let s = start_angle - end_angle;
            if s >= TAU { -TAU } else { -s.rem_euclid(TAU) }
        } else {
            let s = end_angle - start_angle;
            if s >= TAU { TAU } else { s.rem_euclid(TAU) }
        };

        let segments = ((radius.max(1.0).sqrt() * 16.0 * sweep.abs() / TAU).ceil() as usize)
            .clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS);
        let center = DVec2::new(x, y);

        for i in 0..=segments {
            let angle = start_angle + sweep * (i as f64 / segments as f64);
            self.push_point(center + DVec2::from_angle(angle) * radius);
        }
    }

    fn close_path(&mut self) {
        // Every subpath is closed implicitly at fill time.
        self.subpath_open = false;
    }

    fn fill(&mut self) {
        let painted = self.fill_path();
        debug!(
            "CpuSurface::fill: {} subpaths, {} pixels painted",
            self.subpaths.len(),
            painted
        );
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let ((x0, x1), (y0, y1)) = self.rect_pixels(x, y, width, height);
        for py in y0..y1 {
            let row = (py as usize) * (self.width as usize);
            self.pixels[row + x0 as usize..row + x1 as usize].fill([0.0, 0.0, 0.0, 0.0]);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let ((x0, x1), (y0, y1)) = self.rect_pixels(x, y, width, height);
        let color = self.fill_color;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }
}
