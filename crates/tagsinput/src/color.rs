//! Color tags.
//!
//! A [`Color`] is a CSS color string that has been checked for shape. It
//! keeps the exact string it was parsed from; nothing is normalized.
//!
//! Accepted forms:
//! - a named color, matched case-insensitively (`red`, `RebeccaPurple`)
//! - hex: `#rgb`, `#rrggbb`, `#rgba`, `#rrggbbaa`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)` with integer or percentage channels
//! - `hsl(h, s, l)` and `hsla(h, s, l, a)`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagsError;

/// CSS named colors accepted as color tags.
pub const NAMED_COLORS: &[&str] = &[
    "aliceblue",
    "antiquewhite",
    "aqua",
    "aquamarine",
    "azure",
    "beige",
    "bisque",
    "black",
    "blanchedalmond",
    "blue",
    "blueviolet",
    "brown",
    "burlywood",
    "cadetblue",
    "chartreuse",
    "chocolate",
    "coral",
    "cornflowerblue",
    "cornsilk",
    "crimson",
    "cyan",
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "deepskyblue",
    "dimgray",
    "dodgerblue",
    "firebrick",
    "floralwhite",
    "forestgreen",
    "fuchsia",
    "gainsboro",
    "ghostwhite",
    "gold",
    "goldenrod",
    "gray",
    "green",
    "greenyellow",
    "honeydew",
    "hotpink",
    "indianred",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "lavenderblush",
    "lawngreen",
    "lemonchiffon",
    "lightblue",
    "lightcoral",
    "lightcyan",
    "lightgoldenrodyellow",
    "lightgray",
    "lightgreen",
    "lightpink",
    "lightsalmon",
    "lightseagreen",
    "lightskyblue",
    "lightslategray",
    "lightsteelblue",
    "lightyellow",
    "lime",
    "limegreen",
    "linen",
    "magenta",
    "maroon",
    "mediumaquamarine",
    "mediumblue",
    "mediumorchid",
    "mediumpurple",
    "mediumseagreen",
    "mediumslateblue",
    "mediumspringgreen",
    "mediumturquoise",
    "mediumvioletred",
    "midnightblue",
    "mintcream",
    "mistyrose",
    "moccasin",
    "navajowhite",
    "navy",
    "oldlace",
    "olive",
    "olivedrab",
    "orange",
    "orangered",
    "orchid",
    "palegoldenrod",
    "palegreen",
    "paleturquoise",
    "palevioletred",
    "papayawhip",
    "peachpuff",
    "peru",
    "pink",
    "plum",
    "powderblue",
    "purple",
    "rebeccapurple",
    "red",
    "rosybrown",
    "royalblue",
    "saddlebrown",
    "salmon",
    "sandybrown",
    "seagreen",
    "seashell",
    "sienna",
    "silver",
    "skyblue",
    "slateblue",
    "slategray",
    "snow",
    "springgreen",
    "steelblue",
    "tan",
    "teal",
    "thistle",
    "tomato",
    "transparent",
    "turquoise",
    "violet",
    "wheat",
    "white",
    "whitesmoke",
    "yellow",
    "yellowgreen",
];

/// A well-formed CSS color string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parses a color string, keeping it verbatim on success.
    pub fn parse(value: impl Into<String>) -> Result<Self, TagsError> {
        let value = value.into();
        if is_valid_color(&value) {
            Ok(Self(value))
        } else {
            Err(TagsError::InvalidColor(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = TagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = TagsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Checks whether `value` is a color string the display surface can render.
pub fn is_valid_color(value: &str) -> bool {
    NAMED_COLORS.contains(&value.to_ascii_lowercase().as_str())
        || is_hex_color(value)
        || is_functional_color(value)
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_functional_color(value: &str) -> bool {
    let Some((name, rest)) = value.split_once('(') else {
        return false;
    };
    let Some(args) = rest.strip_suffix(')') else {
        return false;
    };
    let channels: Vec<&str> = args.split(',').collect();

    match (name, channels.as_slice()) {
        ("rgb", [r, g, b]) => [r, g, b].iter().all(|c| is_int_channel(c)),
        ("rgba", [r, g, b, a]) => [r, g, b].iter().all(|c| is_int_channel(c)) && is_frac_channel(a),
        ("hsl", [h, s, l]) => [h, s, l].iter().all(|c| is_frac_channel(c)),
        ("hsla", [h, s, l, a]) => [h, s, l, a].iter().all(|c| is_frac_channel(c)),
        _ => false,
    }
}

/// `\s*\d+%?\s*`
fn is_int_channel(channel: &str) -> bool {
    let channel = channel.trim();
    let digits = channel.strip_suffix('%').unwrap_or(channel);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `\s*(\d+(\.\d*)?|\.\d+)?%?\s*`, the number itself may be omitted.
fn is_frac_channel(channel: &str) -> bool {
    let channel = channel.trim();
    let number = channel.strip_suffix('%').unwrap_or(channel);
    if number.is_empty() {
        return true;
    }
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match fraction {
        None => all_digits(whole),
        Some(fraction) if whole.is_empty() => !fraction.is_empty() && all_digits(fraction),
        Some(fraction) => all_digits(whole) && all_digits(fraction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert!(Color::parse("red").is_ok());
        assert!(Color::parse("RebeccaPurple").is_ok());
        assert!(Color::parse("transparent").is_ok());
        assert!(Color::parse("reddish").is_err());
    }

    #[test]
    fn test_named_color_keeps_original_case() {
        assert_eq!(Color::parse("Red").unwrap().as_str(), "Red");
    }

    #[test]
    fn test_hex_colors() {
        for ok in ["#fff", "#FFFF", "#a1b2c3", "#A1B2C3D4"] {
            assert!(Color::parse(ok).is_ok(), "{ok} should parse");
        }
        for bad in ["#", "#ff", "#fffff", "#ggg", "fff", "#a1b2c3d"] {
            assert!(Color::parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_rgb_colors() {
        assert!(Color::parse("rgb(255,0,0)").is_ok());
        assert!(Color::parse("rgb( 255 , 0% , 10 )").is_ok());
        assert!(Color::parse("rgba(255,0,0,0.5)").is_ok());
        assert!(Color::parse("rgba(255,0,0,50%)").is_ok());
        assert!(Color::parse("rgb(1.5,0,0)").is_err());
        assert!(Color::parse("rgb(255,0)").is_err());
        assert!(Color::parse("rgba(255,0,0)").is_err());
        assert!(Color::parse("rgb(255,0,0").is_err());
    }

    #[test]
    fn test_hsl_colors() {
        assert!(Color::parse("hsl(120,100%,50%)").is_ok());
        assert!(Color::parse("hsla(120, 100%, 50%, .3)").is_ok());
        assert!(Color::parse("hsl(12.,1,1)").is_ok());
        assert!(Color::parse("hsl(1..2,1,1)").is_err());
        assert!(Color::parse("hsl(a,1,1)").is_err());
        assert!(Color::parse("hsv(1,1,1)").is_err());
    }

    #[test]
    fn test_blank_is_not_a_color() {
        assert!(matches!(Color::parse(""), Err(TagsError::InvalidColor(_))));
    }

    #[test]
    fn test_serde_validates() {
        let color: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(color.as_str(), "#00ff00");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#00ff00\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
