use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub surface_bright: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
    /// Fills of the budget chart: spent, then budget.
    pub spent: Color,
    pub budget: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(150, 150, 150),
            dim: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(80, 160, 160),
            surface_bright: Color::Reset,
            positive: Color::Rgb(90, 190, 120),
            negative: Color::Rgb(220, 100, 100),
            warning: Color::Rgb(220, 180, 80),
            error: Color::Rgb(200, 80, 80),
            spent: Color::Rgb(248, 113, 113),
            budget: Color::Rgb(96, 165, 250),
        }
    }
}

/// Palette cycled through by the expense breakdown.
pub const SLICE_COLORS: [Color; 7] = [
    Color::Rgb(0, 136, 254),
    Color::Rgb(0, 196, 159),
    Color::Rgb(255, 187, 40),
    Color::Rgb(255, 128, 66),
    Color::Rgb(136, 132, 216),
    Color::Rgb(130, 202, 157),
    Color::Rgb(255, 198, 88),
];
