use super::{ColorSpace, ColorValue};
use crate::error::{Error, Result};

/// Parse a color from a string.
///
/// The allowed formats are:
/// * `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (alpha is ignored)
/// * `rgb(R G B)`, `hsl(H S L)`, `hwb(H W B)`, `oklch(L C H)`, `lch(L C H)`,
///   with spaces or commas between components and an optional `/ A` suffix.
pub(crate) fn parse_color(input: &str) -> Result<ColorValue> {
    let value = input.trim();
    let invalid = || Error::InvalidColorFormat(input.to_string());

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let (name, rest) = value.split_once('(').ok_or_else(invalid)?;
    let content = rest.strip_suffix(')').ok_or_else(invalid)?;
    let space = match name.trim().to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => ColorSpace::Srgb,
        "hsl" | "hsla" => ColorSpace::Hsl,
        "hwb" => ColorSpace::Hwb,
        "oklch" => ColorSpace::Oklch,
        "lch" => ColorSpace::Lch,
        _ => return Err(invalid()),
    };

    let color_part = match content.split_once('/') {
        Some((color_part, alpha)) => {
            parse_component(alpha.trim(), 1.0).ok_or_else(invalid)?;
            color_part
        }
        None => content,
    };

    let parts: Vec<&str> = if color_part.contains(',') {
        color_part.split(',').map(str::trim).collect()
    } else {
        color_part.split_whitespace().collect()
    };
    let [a, b, c] = parts.as_slice() else {
        return Err(invalid());
    };

    let coords = match space {
        ColorSpace::Srgb => [
            parse_component(a, 255.0),
            parse_component(b, 255.0),
            parse_component(c, 255.0),
        ]
        .map(|v| v.map(|v| v / 255.0)),
        ColorSpace::Hsl | ColorSpace::Hwb => [
            parse_component(a, 1.0),
            parse_component(b, 100.0),
            parse_component(c, 100.0),
        ],
        ColorSpace::Oklch => [
            parse_component(a, 1.0),
            parse_component(b, 0.4),
            parse_component(c, 1.0),
        ],
        ColorSpace::Lch => [
            parse_component(a, 100.0),
            parse_component(b, 150.0),
            parse_component(c, 1.0),
        ],
    };

    match coords {
        [Some(a), Some(b), Some(c)] => Ok(ColorValue::new(space, [a, b, c])),
        _ => Err(invalid()),
    }
}

/// Parse a number, a percentage of `percent_reference`, or an angle in degrees.
fn parse_component(text: &str, percent_reference: f64) -> Option<f64> {
    let value = if let Some(percent) = text.strip_suffix('%') {
        percent.trim().parse::<f64>().ok()? * percent_reference / 100.0
    } else if let Some(degrees) = text.strip_suffix("deg") {
        degrees.trim().parse::<f64>().ok()?
    } else {
        text.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

fn parse_hex(hex: &str) -> Option<ColorValue> {
    let nibble = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
    let bytes = hex.as_bytes();
    // Alpha digits are ignored but still have to be valid hex.
    if !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }

    let (r, g, b) = match bytes.len() {
        3 | 4 => (
            nibble(bytes[0])? * 17,
            nibble(bytes[1])? * 17,
            nibble(bytes[2])? * 17,
        ),
        6 | 8 => {
            let byte = |i: usize| Some(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?);
            (byte(0)?, byte(2)?, byte(4)?)
        }
        _ => return None,
    };

    Some(ColorValue::from_rgb8(r, g, b))
}
