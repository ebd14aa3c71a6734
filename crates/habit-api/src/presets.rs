//! Color and icon choices offered when creating a habit

/// Named colors offered for habits (`#RRGGBB`)
pub const COLOR_PRESETS: [(&str, &str); 6] = [
    ("Flash Red", "#DC0000"),
    ("Lightning Yellow", "#FFC500"),
    ("Fire Orange", "#FF4500"),
    ("Nitro Violet", "#8B00FF"),
    ("Turbo Blue", "#0080FF"),
    ("Boost Green", "#00FF80"),
];

/// Icon names understood by front ends
pub const ICON_PRESETS: [&str; 6] = ["target", "flame", "zap", "trophy", "heart", "book"];

pub const DEFAULT_COLOR: &str = COLOR_PRESETS[0].1;

pub const DEFAULT_ICON: &str = ICON_PRESETS[0];

/// Check a `#RRGGBB` color string
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
