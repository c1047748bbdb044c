// Drawing primitives the particle field renders through. The browser canvas is
// one implementation; tests swap in a surface that records calls instead.

use crate::color::Color;
use crate::error::FieldError;
use crate::field::Size;
use vecmath::Vector2;

pub trait Surface {
    fn clear(&mut self, size: Size) -> Result<(), FieldError>;

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), FieldError>;

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    ) -> Result<(), FieldError>;

    // Backing store follows the viewport; surfaces without one ignore this
    fn resize(&mut self, _size: Size) {}

    /// False once the host has torn the surface down.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Surface that discards everything. Useful for driving the simulation
/// headless.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _size: Size) -> Result<(), FieldError> {
        Ok(())
    }

    fn fill_circle(&mut self, _: Vector2<f64>, _: f64, _: Color) -> Result<(), FieldError> {
        Ok(())
    }

    fn stroke_line(
        &mut self,
        _: Vector2<f64>,
        _: Vector2<f64>,
        _: Color,
        _: f64,
    ) -> Result<(), FieldError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear(Size),
        Circle {
            center: Vector2<f64>,
            radius: f64,
            color: Color,
        },
        Line {
            from: Vector2<f64>,
            to: Vector2<f64>,
            color: Color,
            width: f64,
        },
    }

    #[derive(Debug)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
        pub size: Option<Size>,
        pub valid: bool,
        // Circles are refused with a draw error while set
        pub reject_circles: bool,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            RecordingSurface {
                calls: Vec::new(),
                size: None,
                valid: true,
                reject_circles: false,
            }
        }

        pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Line { .. }))
        }

        pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Circle { .. }))
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, size: Size) -> Result<(), FieldError> {
            self.calls.push(DrawCall::Clear(size));
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            color: Color,
        ) -> Result<(), FieldError> {
            if self.reject_circles {
                return Err(FieldError::Draw("circle refused".to_owned()));
            }
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color,
            });
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            color: Color,
            width: f64,
        ) -> Result<(), FieldError> {
            self.calls.push(DrawCall::Line {
                from,
                to,
                color,
                width,
            });
            Ok(())
        }

        fn resize(&mut self, size: Size) {
            self.size = Some(size);
        }

        fn is_valid(&self) -> bool {
            self.valid
        }
    }
}
