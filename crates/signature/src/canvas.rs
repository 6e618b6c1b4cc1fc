//! Drawing capability consumed by the stroke pipeline
//!
//! The pipeline only ever issues whole paths: `begin_path`, a run of
//! `move_to`/`arc` calls, `close_path`, then a single `fill`. Backends are
//! expected to buffer path commands and paint on `fill`.

/// A 2D drawing surface in pixel coordinates
pub trait Canvas2DSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Set the colour used by `fill` and `fill_rect` (a CSS colour string)
    fn set_fill_style(&mut self, style: &str);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
    fn close_path(&mut self);
    fn fill(&mut self);

    /// Reset a rectangle to fully transparent
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// One recorded call on a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    SetFillStyle(String),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    ClosePath,
    Fill,
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
}

/// A disc painted as part of a filled path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A committed path: its fill colour and the discs it contained
#[derive(Debug, Clone, PartialEq)]
pub struct FilledPath {
    pub color: String,
    pub discs: Vec<Disc>,
}

/// Surface that records every call instead of drawing
///
/// Useful for forwarding commands to a real canvas elsewhere, and for
/// asserting on exactly what the pipeline drew.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Remove and return all recorded commands
    pub fn take_commands(&mut self) -> Vec<CanvasCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Reconstruct the filled paths from the recorded commands
    ///
    /// Each `fill` yields one entry holding the fill style active at that
    /// point and the arcs issued since the preceding `begin_path`.
    pub fn fills(&self) -> Vec<FilledPath> {
        let mut fills = Vec::new();
        let mut style = String::new();
        let mut discs = Vec::new();

        for command in &self.commands {
            match command {
                CanvasCommand::SetFillStyle(s) => style = s.clone(),
                CanvasCommand::BeginPath => discs.clear(),
                CanvasCommand::Arc { x, y, radius, .. } => discs.push(Disc {
                    x: *x,
                    y: *y,
                    radius: *radius,
                }),
                CanvasCommand::Fill => fills.push(FilledPath {
                    color: style.clone(),
                    discs: discs.clone(),
                }),
                _ => {}
            }
        }

        fills
    }
}

impl Canvas2DSurface for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(CanvasCommand::SetFillStyle(style.to_string()));
    }

    fn begin_path(&mut self) {
        self.commands.push(CanvasCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(CanvasCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(CanvasCommand::LineTo { x, y });
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
        self.commands.push(CanvasCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(CanvasCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(CanvasCommand::Fill);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(CanvasCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(CanvasCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }
}
