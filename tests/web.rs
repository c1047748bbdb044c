//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field_backend::{
    canvas, CanvasSurface, FieldError, ParticleBackground, ParticleField, Size, Surface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn container(id: &str) -> Element {
    let document = document();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn attached_canvas(container: &Element) -> HtmlCanvasElement {
    container
        .first_element_child()
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn attach_creates_sized_canvas() {
    let host = container("attach-host");
    let surface = CanvasSurface::attach(&document(), "attach-host", Size::new(320.0, 240.0)).unwrap();

    let canvas = attached_canvas(&host);
    assert_eq!(canvas.width(), 320);
    assert_eq!(canvas.height(), 240);
    assert_eq!(canvas.style().get_property_value("position").unwrap(), "absolute");
    assert!(surface.is_valid());
}

#[wasm_bindgen_test]
fn attach_to_missing_container_fails() {
    let result = CanvasSurface::attach(&document(), "no-such-host", Size::new(10.0, 10.0));
    match result {
        Err(FieldError::Allocation(reason)) => assert!(reason.contains("no-such-host")),
        other => panic!("expected allocation failure, got {:?}", other.err()),
    }
}

#[wasm_bindgen_test]
fn field_renders_onto_canvas() {
    container("render-host");
    let size = Size::new(200.0, 200.0);
    let mut surface = CanvasSurface::attach(&document(), "render-host", size).unwrap();
    let mut field = ParticleField::new(size);

    for _ in 0..10 {
        field.step();
        field.render(&mut surface).unwrap();
    }
    assert_eq!(field.len(), 80);
}

#[wasm_bindgen_test]
fn viewport_size_matches_window() {
    let window = web_sys::window().unwrap();
    let size = canvas::viewport_size(&window).unwrap();
    assert_eq!(size.width, window.inner_width().unwrap().as_f64().unwrap());
    assert_eq!(size.height, window.inner_height().unwrap().as_f64().unwrap());
}

#[wasm_bindgen_test]
fn background_ticks_until_canvas_is_removed() {
    let host = container("background-host");
    let mut background = ParticleBackground::new("background-host", Some(12), Some(100.0)).unwrap();
    assert_eq!(background.particle_count(), 12);
    assert_eq!(background.positions().length(), 36);
    assert!(background.tick().unwrap());

    background.resize(150.0, 90.0);
    let canvas = attached_canvas(&host);
    assert_eq!(canvas.width(), 150);
    assert_eq!(canvas.height(), 90);

    host.remove_child(&canvas).unwrap();
    assert!(!background.tick().unwrap());
    assert!(!background.is_running());
}

#[wasm_bindgen_test]
fn started_background_stops_on_request() {
    container("loop-host");
    let mut handle =
        particle_field_backend::start_background("loop-host", Some(5), None).unwrap();
    assert!(handle.is_running());
    assert_eq!(handle.particle_count(), 5);

    handle.stop();
    assert!(!handle.is_running());
    assert!(!handle.is_attached());
}

#[wasm_bindgen_test]
fn oversized_count_is_refused_before_attaching() {
    let host = container("crowded-host");
    let result = ParticleBackground::new("crowded-host", Some(u32::MAX), None);
    assert!(result.is_err());
    assert!(host.first_element_child().is_none());
}

// Resolves on the next animation frame, after callbacks requested earlier
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn loop_unhooks_itself_once_canvas_is_removed() {
    let host = container("detach-host");
    let handle = particle_field_backend::start_background("detach-host", Some(5), None).unwrap();
    assert!(handle.is_attached());

    let canvas = attached_canvas(&host);
    host.remove_child(&canvas).unwrap();
    next_frame().await;
    next_frame().await;

    assert!(!handle.is_running());
    assert!(!handle.is_attached());

    // A resize after the loop ended leaves the detached canvas alone
    canvas.set_width(1);
    let window = web_sys::window().unwrap();
    window
        .dispatch_event(&web_sys::Event::new("resize").unwrap())
        .unwrap();
    assert_eq!(canvas.width(), 1);
}
