use crate::wifi::SignalQuality;
use ratatui::style::Color;

pub const BACKGROUND: Color = Color::Rgb(24, 23, 21); // #181715
pub const FOREGROUND: Color = Color::Rgb(168, 163, 159); // #A8A39F
pub const DIMMED: Color = Color::Rgb(85, 84, 69); // #555445
pub const RED: Color = Color::Rgb(152, 41, 15); // #98290F
pub const GREEN: Color = Color::Rgb(71, 154, 67); // #479A43
pub const YELLOW: Color = Color::Rgb(127, 113, 17); // #7F7111
pub const BLUE: Color = Color::Rgb(73, 127, 125); // #497F7D
pub const PURPLE: Color = Color::Rgb(127, 78, 47); // #7F4E2F
pub const CYAN: Color = Color::Rgb(56, 127, 88); // #387F58
pub const BRIGHT_YELLOW: Color = Color::Rgb(214, 153, 39); // #D69927
pub const BRIGHT_PURPLE: Color = Color::Rgb(205, 124, 84); // #CD7C54

pub const SELECTION_BG: Color = Color::Rgb(65, 56, 41); // #413829

pub fn signal_color(quality: SignalQuality) -> Color {
    match quality {
        SignalQuality::Excellent => GREEN,
        SignalQuality::Good => CYAN,
        SignalQuality::Fair => YELLOW,
        SignalQuality::Weak => RED,
    }
}
