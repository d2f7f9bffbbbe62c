#![forbid(unsafe_code)]

//! Drawing seam between the particle simulation and a host renderer.
//!
//! The web host implements [`Surface`] over a `CanvasRenderingContext2d`; the
//! terminal host over a Braille painter. [`RecordingSurface`] captures the
//! calls for assertions.

use crate::theme::Rgba;

/// Minimal immediate-mode 2D target.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle centered at `(x, y)`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    },
}

/// A [`Surface`] that stores every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since creation or the last [`take`](Self::take).
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded calls.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded circles.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Recorded lines with the given color.
    pub fn lines_with_color(&self, color: Rgba) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Line { color: lc, .. } if *lc == color))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
