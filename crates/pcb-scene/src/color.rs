use serde::Serialize;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Board slab fill (forest green).
pub const BOARD: Color = Color::rgb(0x22, 0x8B, 0x22);

/// Neutral fallback for component types with no table entry.
pub const FALLBACK: Color = Color::rgb(0xD3, 0xD3, 0xD3);

pub const AXIS_X: Color = Color::rgb(0xFF, 0x00, 0x00);
pub const AXIS_Y: Color = Color::rgb(0x00, 0x80, 0x00);
pub const AXIS_Z: Color = Color::rgb(0x00, 0x00, 0xFF);

/// Fill color for a component category. An unmatched category gets the
/// neutral fallback; it is never an error.
pub fn color_for_kind(kind: &str) -> Color {
    match kind {
        "Capacitor" => Color::rgb(0xFF, 0xA5, 0x00),
        "Resistor" => Color::rgb(0x00, 0x00, 0xFF),
        "Inductor" => Color::rgb(0x80, 0x00, 0x80),
        "Diode" => Color::rgb(0xFF, 0x00, 0x00),
        "Transistor" => Color::rgb(0x00, 0x00, 0x00),
        "IC" => Color::rgb(0x80, 0x80, 0x80),
        "Connector" => Color::rgb(0xF5, 0xF5, 0xF5),
        "LED" => Color::rgb(0xFF, 0xFF, 0x00),
        "CrystalOscillator" => Color::rgb(0xAD, 0xD8, 0xE6),
        "Switch" => Color::rgb(0xA5, 0x2A, 0x2A),
        "Socket" => Color::rgb(0x90, 0xEE, 0x90),
        "Varistor" => Color::rgb(0x00, 0xFF, 0xFF),
        "Harness" => Color::rgb(0xFF, 0xC0, 0xCB),
        _ => FALLBACK,
    }
}
