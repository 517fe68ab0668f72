//! Color and font encoding for Companion button styles.
//!
//! Companion stores colors as a packed 24-bit integer (`0xRRGGBB` as decimal)
//! and font sizes as either a point size or the string `"auto"`.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default text color when a style omits `color_text`.
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Default background color when a style omits `color_bg`.
pub const DEFAULT_BG_COLOR: &str = "#000000";

/// Point size used when a font-size token is missing or unrecognized.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Font-size tokens accepted in page files, in ascending order.
pub const FONT_SIZE_TOKENS: [&str; 7] = ["auto", "7pt", "14pt", "18pt", "24pt", "30pt", "44pt"];

/// Largest value a packed color can take.
pub const MAX_COLOR: u32 = 0x00FF_FFFF;

/// Convert a `#RRGGBB` (or `#RGB`) string into Companion's packed integer.
///
/// Anything that is not three or six hex digits after an optional `#`
/// decodes to `0` (black). Malformed colors are a validation warning, never
/// a compile failure.
///
/// ```
/// use cb::style::hex_to_color;
///
/// assert_eq!(hex_to_color("#CC0000"), 13_369_344);
/// assert_eq!(hex_to_color("#FFF"), 16_777_215);
/// assert_eq!(hex_to_color("nope"), 0);
/// ```
#[must_use]
pub fn hex_to_color(hex: &str) -> u32 {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if expanded.len() != 6 {
        trace!(input = %hex, "Color has wrong length, using black");
        return 0;
    }

    u32::from_str_radix(&expanded, 16).unwrap_or_else(|_| {
        trace!(input = %hex, "Color is not hex, using black");
        0
    })
}

/// Check the `#RRGGBB` shape the validator expects.
///
/// Only the shape is checked (leading `#`, seven characters); the digits are
/// not. This mirrors what authors get warned about.
#[must_use]
pub fn looks_like_hex_color(value: &str) -> bool {
    value.starts_with('#') && value.len() == 7
}

/// Resolved font size for a Companion button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    /// Let Companion pick a size that fits the text.
    Auto(AutoSize),
    /// Fixed point size.
    Points(u32),
}

/// Marker serialized as the string `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoSize {
    Auto,
}

impl Default for FontSize {
    fn default() -> Self {
        Self::Points(DEFAULT_FONT_SIZE)
    }
}

impl FontSize {
    /// Map a page-file token (`"14pt"`, `"auto"`) to a font size.
    ///
    /// Returns `None` for tokens outside [`FONT_SIZE_TOKENS`].
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "auto" => Some(Self::Auto(AutoSize::Auto)),
            "7pt" => Some(Self::Points(7)),
            "14pt" => Some(Self::Points(14)),
            "18pt" => Some(Self::Points(18)),
            "24pt" => Some(Self::Points(24)),
            "30pt" => Some(Self::Points(30)),
            "44pt" => Some(Self::Points(44)),
            _ => None,
        }
    }

    /// Like [`FontSize::from_token`] but falls back to the default size.
    #[must_use]
    pub fn from_token_or_default(token: Option<&str>) -> Self {
        token.and_then(Self::from_token).unwrap_or_default()
    }
}

/// Join the two text lines of a button.
///
/// Companion expects the two-character sequence `\n` (backslash, n) as the
/// line separator inside button text, not a raw newline.
#[must_use]
pub fn join_text_lines(top: Option<&str>, bottom: Option<&str>) -> String {
    let top = top.unwrap_or("");
    let bottom = bottom.unwrap_or("");
    match (top.is_empty(), bottom.is_empty()) {
        (false, false) => format!("{top}\\n{bottom}"),
        (false, true) => top.to_string(),
        _ => bottom.to_string(),
    }
}

/// True if the text references a Companion variable, e.g. `$(internal:time_hms)`.
#[must_use]
pub fn contains_variable_expression(text: &str) -> bool {
    text.contains("$(")
}
