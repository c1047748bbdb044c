// Canvas-backed surface. Creates a full-viewport <canvas> inside a container
// element and draws through its 2d context.

use crate::color::Color;
use crate::error::FieldError;
use crate::field::Size;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Appends a fresh canvas to the element with id `container_id`, pinned to
    // the container's top-left corner
    pub fn attach(
        document: &Document,
        container_id: &str,
        size: Size,
    ) -> Result<CanvasSurface, FieldError> {
        let container = document.get_element_by_id(container_id).ok_or_else(|| {
            FieldError::Allocation(format!("no element with id '{}'", container_id))
        })?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| FieldError::allocation("create canvas", e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::Allocation("created element is not a canvas".to_owned()))?;
        container
            .append_child(&canvas)
            .map_err(|e| FieldError::allocation("append canvas", e))?;

        let style = canvas.style();
        for (property, value) in &[("position", "absolute"), ("top", "0"), ("left", "0")] {
            style
                .set_property(property, value)
                .map_err(|e| FieldError::allocation("style canvas", e))?;
        }

        let mut surface = CanvasSurface::from_canvas(canvas)?;
        surface.resize(size);
        Ok(surface)
    }

    /// Wrap an existing canvas element.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<CanvasSurface, FieldError> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| FieldError::allocation("get 2d context", e))?
            .ok_or_else(|| FieldError::Allocation("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::Allocation("context is not a 2d context".to_owned()))?;

        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: Size) -> Result<(), FieldError> {
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), FieldError> {
        self.context.begin_path();
        self.context
            .arc(center[0], center[1], radius, 0.0, PI * 2.0)
            .map_err(|e| FieldError::draw("arc", e))?;
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    ) -> Result<(), FieldError> {
        self.context.begin_path();
        #[allow(deprecated)]
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        Ok(())
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
    }

    // Detached from the document means the page tore it down
    fn is_valid(&self) -> bool {
        self.canvas.is_connected()
    }
}

/// The window's inner size, which the background canvas always fills.
pub fn viewport_size(window: &Window) -> Result<Size, FieldError> {
    let width = read_dimension(window.inner_width(), "innerWidth")?;
    let height = read_dimension(window.inner_height(), "innerHeight")?;
    Ok(Size::new(width, height))
}

fn read_dimension(value: Result<JsValue, JsValue>, what: &str) -> Result<f64, FieldError> {
    value
        .map_err(|e| FieldError::allocation(what, e))?
        .as_f64()
        .ok_or_else(|| FieldError::Allocation(format!("{} is not a number", what)))
}
