mod utils;

pub mod animation;
pub mod canvas;
pub mod color;
pub mod error;
pub mod field;
pub mod particle;
pub mod surface;

pub use animation::{AnimationLoop, Animator, LoopState};
pub use canvas::CanvasSurface;
pub use color::Color;
pub use error::FieldError;
pub use field::{Connection, FieldConfig, ParticleField, Size};
pub use particle::Particle;
pub use surface::{NullSurface, Surface};

use wasm_bindgen::prelude::*;
use web_sys::console;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Field sized to the current viewport, drawn on a canvas inside `container_id`
fn build_animator(
    container_id: &str,
    count: Option<u32>,
    connection_distance: Option<f64>,
) -> Result<(web_sys::Window, Animator<CanvasSurface>), FieldError> {
    let window =
        web_sys::window().ok_or_else(|| FieldError::Allocation("no global window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| FieldError::Allocation("window has no document".to_owned()))?;

    let mut config = FieldConfig::default();
    if let Some(count) = count {
        config.particle_count = count as usize;
    }
    if let Some(distance) = connection_distance {
        config.connection_distance = distance;
    }
    config.validate()?;

    let size = canvas::viewport_size(&window)?;
    let surface = CanvasSurface::attach(&document, container_id, size)?;
    let field = ParticleField::with_config(size, config);

    console::log_1(
        &format!(
            "particle field: {}x{} with {} particles",
            size.width,
            size.height,
            field.len()
        )
        .into(),
    );

    Ok((window, Animator::new(field, surface)))
}

/// A particle background the page drives itself, calling `tick` (or `step`
/// and `render`) from its own frame callback.
#[wasm_bindgen]
pub struct ParticleBackground {
    animator: Animator<CanvasSurface>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        count: Option<u32>,
        connection_distance: Option<f64>,
    ) -> Result<ParticleBackground, JsValue> {
        let (_, animator) = build_animator(container_id, count, connection_distance)?;
        Ok(ParticleBackground { animator })
    }

    pub fn step(&mut self) {
        self.animator.step();
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.animator.render()?;
        Ok(())
    }

    /// Step and render; returns whether the background is still running.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let state = self.animator.tick()?;
        Ok(state == LoopState::Running)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.animator.resize(Size::new(width, height));
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn particle_count(&self) -> u32 {
        self.animator.field().len() as u32
    }

    /// Flat `x, y, radius` triples, one per particle.
    pub fn positions(&self) -> js_sys::Float64Array {
        let particles = self.animator.field().particles();
        let result = js_sys::Float64Array::new_with_length((particles.len() * 3) as u32);

        for (i, particle) in particles.iter().enumerate() {
            let base_idx = (i * 3) as u32;
            result.set_index(base_idx, particle.pos[0]);
            result.set_index(base_idx + 1, particle.pos[1]);
            result.set_index(base_idx + 2, particle.radius);
        }

        result
    }

    /// Flat `x1, y1, x2, y2, opacity` quintuples, one per edge.
    pub fn connections(&self) -> js_sys::Float64Array {
        let field = self.animator.field();
        let particles = field.particles();
        let mut values = Vec::new();

        for connection in field.connections() {
            let from = particles[connection.from].pos;
            let to = particles[connection.to].pos;
            values.extend_from_slice(&[from[0], from[1], to[0], to[1], connection.opacity]);
        }

        js_sys::Float64Array::from(&values[..])
    }
}

/// Handle to a self-driving background; stops when `stop` is called or the
/// handle is freed.
#[wasm_bindgen]
pub struct BackgroundHandle {
    animation: AnimationLoop,
}

#[wasm_bindgen]
impl BackgroundHandle {
    pub fn stop(&mut self) {
        self.animation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Whether the loop still holds its resize listener and frame callback.
    pub fn is_attached(&self) -> bool {
        self.animation.is_attached()
    }

    pub fn particle_count(&self) -> u32 {
        self.animation.particle_count() as u32
    }
}

/// Create a background in `container_id` and animate it on every frame,
/// following window resizes.
#[wasm_bindgen]
pub fn start_background(
    container_id: &str,
    count: Option<u32>,
    connection_distance: Option<f64>,
) -> Result<BackgroundHandle, JsValue> {
    let (window, animator) = build_animator(container_id, count, connection_distance)?;
    let animation = AnimationLoop::start(window, animator)?;
    Ok(BackgroundHandle { animation })
}
