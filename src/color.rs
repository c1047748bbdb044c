// Simple color struct, created from an unsigned 32 representing 0xRRGGBB.
// Alpha is kept as a float since edge opacity fades continuously with distance.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const ACCENT: u32 = 0x00d4ff;

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    // CSS color string understood by fillStyle / strokeStyle
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
