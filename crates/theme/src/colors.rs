use rand::Rng;

/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:        Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const MANTLE:      Self = Self { r: 0.094, g: 0.094, b: 0.145, a: 1.0 }; // #181825
    pub const WHITE:       Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const PURPLE:      Self = Self { r: 0.796, g: 0.651, b: 0.969, a: 1.0 }; // #cba6f7
    pub const SURFACE:     Self = Self { r: 0.271, g: 0.278, b: 0.353, a: 1.0 }; // #45475a

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self::from_rgb8(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            8 => Some(Self {
                a: byte(&hex[6..8])? as f32 / 255.0,
                ..Self::from_rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
            }),
            _ => None,
        }
    }

    /// A random opaque colour (six random hex digits, like `#3FA91C`).
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_rgb8(rng.gen(), rng.gen(), rng.gen())
    }

    /// `#rrggbb` form, alpha dropped.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
