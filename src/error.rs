use std::fmt;
use wasm_bindgen::JsValue;

/// Failures surfaced by the particle field and its drawing surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The host could not provide a drawing surface (missing container,
    /// canvas creation refused, no 2d context).
    Allocation(String),
    /// A drawing primitive was rejected by the host.
    Draw(String),
}

impl FieldError {
    pub(crate) fn allocation(context: &str, value: JsValue) -> FieldError {
        FieldError::Allocation(format!("{}: {:?}", context, value))
    }

    pub(crate) fn draw(context: &str, value: JsValue) -> FieldError {
        FieldError::Draw(format!("{}: {:?}", context, value))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldError::Allocation(reason) => write!(f, "failed to allocate surface: {}", reason),
            FieldError::Draw(reason) => write!(f, "failed to draw frame: {}", reason),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
