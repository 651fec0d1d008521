//! Dashboard colour palettes as ratatui Color::Rgb constants.

use ratatui::style::Color;

pub struct SlateColors;

#[allow(dead_code)]
impl SlateColors {
    // Primary palette
    pub const NAVY: Color = Color::Rgb(17, 24, 39); // #111827
    pub const BLUE: Color = Color::Rgb(59, 130, 246); // #3B82F6
    pub const AMBER: Color = Color::Rgb(245, 158, 11); // #F59E0B
    pub const GREEN: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const RED: Color = Color::Rgb(239, 68, 68); // #EF4444
    pub const PURPLE: Color = Color::Rgb(139, 92, 246); // #8B5CF6

    // Surfaces
    pub const BG: Color = Color::Rgb(31, 41, 55); // #1F2937
    pub const SURFACE: Color = Color::Rgb(55, 65, 81); // #374151
    pub const BORDER: Color = Color::Rgb(75, 85, 99); // #4B5563

    // Text
    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 231, 235); // #E5E7EB
    pub const TEXT_SECONDARY: Color = Color::Rgb(156, 163, 175); // #9CA3AF
    pub const TEXT_ON_BAR: Color = Color::Rgb(255, 255, 255);
}

pub struct PaperColors;

#[allow(dead_code)]
impl PaperColors {
    pub const NAVY: Color = Color::Rgb(14, 30, 63); // #0E1E3F
    pub const BLUE: Color = Color::Rgb(84, 113, 223); // #5471DF
    pub const AMBER: Color = Color::Rgb(178, 140, 84); // #B28C54
    pub const GREEN: Color = Color::Rgb(44, 95, 45); // #2C5F2D
    pub const RED: Color = Color::Rgb(184, 80, 66); // #B85042
    pub const PURPLE: Color = Color::Rgb(106, 90, 205); // #6A5ACD

    pub const BG: Color = Color::Rgb(244, 246, 251); // #F4F6FB
    pub const SURFACE: Color = Color::Rgb(255, 255, 255); // #FFFFFF
    pub const BORDER: Color = Color::Rgb(209, 217, 232); // #D1D9E8

    pub const TEXT_PRIMARY: Color = Color::Rgb(45, 55, 72); // #2D3748
    pub const TEXT_SECONDARY: Color = Color::Rgb(107, 122, 153); // #6B7A99
    pub const TEXT_ON_BAR: Color = Color::Rgb(255, 255, 255);
}
