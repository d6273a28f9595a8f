use touchview_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => egui::Visuals::dark(),
            ThemeMode::Light => egui::Visuals::light(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        SurfaceLight => ResolvedColor::rgb(0x45, 0x47, 0x5a), // Surface1
        SurfaceDark => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),  // Base
        SurfaceBorder => ResolvedColor::rgb(0x89, 0xb4, 0xfa), // Blue
        SurfaceAxis => ResolvedColor::rgba(0xf3, 0x8b, 0xa8, 160), // Red

        TouchPoint => ResolvedColor::rgba(0xa6, 0xe3, 0xa1, 200), // Green
        PinchMidpoint => ResolvedColor::rgba(0xf9, 0xe2, 0xaf, 200), // Yellow

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),   // Subtext0
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        Border => ResolvedColor::rgb(210, 210, 220),

        SurfaceLight => ResolvedColor::rgb(245, 245, 248),
        SurfaceDark => ResolvedColor::rgb(215, 218, 228),
        SurfaceBorder => ResolvedColor::rgb(50, 110, 220),
        SurfaceAxis => ResolvedColor::rgba(220, 60, 20, 160),

        TouchPoint => ResolvedColor::rgba(40, 160, 70, 200),
        PinchMidpoint => ResolvedColor::rgba(230, 150, 20, 200),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
        TextMuted => ResolvedColor::rgb(100, 100, 110),
    }
}
