//! Light and dark palettes

use makeupify_core::Theme;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub surface_high: Color,
    pub on_surface: Color,
    pub subtext: Color,
    pub outline: Color,
    pub primary: Color,
    pub accent: Color,
    pub retouch: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(0x14, 0x13, 0x16),
    surface: Color::Rgb(0x20, 0x1d, 0x24),
    surface_high: Color::Rgb(0x2d, 0x28, 0x33),
    on_surface: Color::Rgb(0xe8, 0xe1, 0xea),
    subtext: Color::Rgb(0xcb, 0xc3, 0xcf),
    outline: Color::Rgb(0x95, 0x8e, 0x99),
    primary: Color::Rgb(0xd8, 0xb4, 0xfe),
    accent: Color::Rgb(0xf9, 0xa8, 0xd4),
    retouch: Color::Rgb(0x93, 0xc5, 0xfd),
    success: Color::Rgb(0xb5, 0xcc, 0xba),
    error: Color::Rgb(0xff, 0xb4, 0xab),
    warning: Color::Rgb(0xff, 0xd9, 0x66),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(0xfa, 0xf5, 0xff),
    surface: Color::Rgb(0xff, 0xff, 0xff),
    surface_high: Color::Rgb(0xf3, 0xe8, 0xff),
    on_surface: Color::Rgb(0x1f, 0x29, 0x37),
    subtext: Color::Rgb(0x6b, 0x72, 0x80),
    outline: Color::Rgb(0x9c, 0xa3, 0xaf),
    primary: Color::Rgb(0x7e, 0x22, 0xce),
    accent: Color::Rgb(0xdb, 0x27, 0x77),
    retouch: Color::Rgb(0x25, 0x63, 0xeb),
    success: Color::Rgb(0x15, 0x80, 0x3d),
    error: Color::Rgb(0xdc, 0x26, 0x26),
    warning: Color::Rgb(0xb4, 0x53, 0x09),
};

#[must_use]
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}
