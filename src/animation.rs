// Frame driving. `Animator` is the host-agnostic Running/Stopped lifecycle around
// a field and its surface; `AnimationLoop` drives one from requestAnimationFrame.

use crate::canvas::{self, CanvasSurface};
use crate::error::FieldError;
use crate::field::{ParticleField, Size};
use crate::surface::Surface;
#[cfg(feature = "frame-timing")]
use crate::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Window};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

pub struct Animator<S: Surface> {
    field: ParticleField,
    surface: S,
    state: LoopState,
}

impl<S: Surface> Animator<S> {
    pub fn new(field: ParticleField, surface: S) -> Self {
        Animator {
            field,
            surface,
            state: LoopState::Running,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// There is no way back to `Running`; build a new animator instead.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    // A torn-down surface stops the animator for good
    fn live(&mut self) -> bool {
        if self.is_running() && !self.surface.is_valid() {
            self.stop();
        }
        self.is_running()
    }

    pub fn step(&mut self) {
        if !self.live() {
            return;
        }
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("ParticleField::step");
        self.field.step();
    }

    pub fn render(&mut self) -> Result<(), FieldError> {
        if !self.live() {
            return Ok(());
        }
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("ParticleField::render");
        self.field.render(&mut self.surface)
    }

    /// One frame: step, then render. A failed render stops the animator.
    pub fn tick(&mut self) -> Result<LoopState, FieldError> {
        self.step();
        if let Err(err) = self.render() {
            self.stop();
            return Err(err);
        }
        Ok(self.state)
    }

    pub fn resize(&mut self, size: Size) {
        self.field.on_resize(size);
        self.surface.resize(size);
    }
}

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drives an [`Animator`] once per animation frame and follows window
/// resizes until stopped or dropped.
pub struct AnimationLoop {
    window: Window,
    animator: Rc<RefCell<Animator<CanvasSurface>>>,
    frame: Callback,
    frame_id: Rc<Cell<Option<i32>>>,
    on_resize: Callback,
}

// Unhooks the resize listener and drops the frame closure. wasm-bindgen frees
// a closure dropped during its own call once that call returns.
fn release(window: &Window, frame: &Callback, on_resize: &Callback) {
    frame.borrow_mut().take();
    if let Some(listener) = on_resize.borrow_mut().take() {
        let _ = window
            .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
    }
}

fn request_frame(window: &Window, frame: &Callback) -> Option<Result<i32, JsValue>> {
    frame
        .borrow()
        .as_ref()
        .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()))
}

impl AnimationLoop {
    pub fn start(
        window: Window,
        animator: Animator<CanvasSurface>,
    ) -> Result<AnimationLoop, FieldError> {
        let animator = Rc::new(RefCell::new(animator));
        let frame: Callback = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        let on_resize: Callback = Rc::new(RefCell::new(None));

        let listener = {
            let window = window.clone();
            let animator = animator.clone();
            Closure::wrap(Box::new(move || match canvas::viewport_size(&window) {
                Ok(size) => animator.borrow_mut().resize(size),
                Err(err) => console::error_1(&err.to_string().into()),
            }) as Box<dyn FnMut()>)
        };
        window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            .map_err(|e| FieldError::allocation("add resize listener", e))?;
        *on_resize.borrow_mut() = Some(listener);

        {
            let window = window.clone();
            let animator = animator.clone();
            // Weak, so the closure does not keep its own cell alive
            let next = Rc::downgrade(&frame);
            let frame_id = frame_id.clone();
            let on_resize = on_resize.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame_id.set(None);
                let outcome = animator.borrow_mut().tick();
                if let Err(err) = outcome {
                    console::error_1(&err.to_string().into());
                }
                let frame = match next.upgrade() {
                    Some(frame) => frame,
                    None => return,
                };
                if !animator.borrow().is_running() {
                    release(&window, &frame, &on_resize);
                    return;
                }
                match request_frame(&window, &frame) {
                    Some(Ok(id)) => frame_id.set(Some(id)),
                    Some(Err(e)) => {
                        console::error_2(&"requestAnimationFrame failed".into(), &e);
                        animator.borrow_mut().stop();
                        release(&window, &frame, &on_resize);
                    }
                    None => {}
                }
            }) as Box<dyn FnMut()>));
        }

        let mut animation = AnimationLoop {
            window,
            animator,
            frame,
            frame_id,
            on_resize,
        };

        match request_frame(&animation.window, &animation.frame) {
            Some(Ok(id)) => animation.frame_id.set(Some(id)),
            Some(Err(e)) => {
                animation.stop();
                return Err(FieldError::allocation("request first frame", e));
            }
            None => {}
        }

        Ok(animation)
    }

    pub fn is_running(&self) -> bool {
        self.animator.borrow().is_running()
    }

    /// Whether the resize listener and frame closure are still held. False
    /// after `stop` and after the loop ends on its own.
    pub fn is_attached(&self) -> bool {
        self.frame.borrow().is_some() || self.on_resize.borrow().is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.animator.borrow().field().len()
    }

    pub fn stop(&mut self) {
        self.animator.borrow_mut().stop();
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        release(&self.window, &self.frame, &self.on_resize);
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
