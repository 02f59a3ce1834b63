use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const HOST: Color = Color::BrightBlue;
pub const PORT: Color = Color::BrightMagenta;
pub const READY: Color = Color::Green;
pub const DOWN: Color = Color::Red;
