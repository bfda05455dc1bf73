//! Stroke style interpretation.
//!
//! Maps the raw presentation attributes of a curve to laser settings:
//! - darker strokes burn harder (`laser_power = opacity - gray`)
//! - a `stroke-width` in the inline style slows the cut (`1 - width`)
//!
//! Inline `style` declarations take precedence over the raw `stroke` and
//! `stroke-width` attributes. Anything that cannot be parsed falls back to the
//! defaults (opacity 1, gray 0, multiplier 1) without failing the compile.

use crate::error::StyleError;
use curvecam_geometry::StrokeStyle;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Scale applied to the gray value before it is subtracted from opacity.
const GRAY_WEIGHT: f64 = 0.997826086956047;

/// Parsed inline style declarations, keyed by property name.
pub type StyleMap = HashMap<String, String>;

/// Laser settings derived for one chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserSettings {
    /// Requested power; not clamped, the interface enforces `[0, 1]`
    pub laser_power: f64,
    /// Factor applied to the cutting speed
    pub speed_multiplier: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            laser_power: 1.0,
            speed_multiplier: 1.0,
        }
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// Parse `key:value;key:value` declarations.
///
/// Empty declarations are skipped; a declaration without a colon or with an
/// empty key is an error. Later keys override earlier ones.
pub fn parse_style(style: &str) -> Result<StyleMap, StyleError> {
    let mut map = StyleMap::new();
    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let (key, value) = declaration
            .split_once(':')
            .ok_or_else(|| StyleError::MalformedDeclaration(declaration.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(StyleError::MalformedDeclaration(declaration.to_string()));
        }
        map.insert(key.to_ascii_lowercase(), value.trim().to_string());
    }
    Ok(map)
}

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
            .expect("invalid rgb regex")
    })
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `black` or `white`.
pub fn parse_color(value: &str) -> Result<Rgb, StyleError> {
    let value = value.trim();
    let invalid = || StyleError::InvalidColor(value.to_string());

    match value.to_ascii_lowercase().as_str() {
        "black" => return Ok(Rgb::BLACK),
        "white" => return Ok(Rgb::WHITE),
        _ => {}
    }

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        return match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Rgb {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            6 => Ok(Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => Err(invalid()),
        };
    }

    let caps = rgb_regex().captures(value).ok_or_else(invalid)?;
    let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
    Ok(Rgb {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}

/// Perceived brightness: 0 for black, 1 for white.
pub fn gray_value(color: Rgb) -> f64 {
    (0.299 * color.r as f64 + 0.587 * color.g as f64 + 0.114 * color.b as f64) / 255.0
}

/// Parse a length such as `0.26`, `0.26px` or `1.5mm`, ignoring the unit.
fn parse_length(key: &str, value: &str) -> Result<f64, StyleError> {
    let number = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    number.trim().parse::<f64>().map_err(|_| StyleError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_number(key: &str, value: &str) -> Result<f64, StyleError> {
    value.trim().parse::<f64>().map_err(|_| StyleError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Gray value of a raw color attribute; empty means black.
fn stroke_gray(stroke: &str) -> Result<f64, StyleError> {
    if stroke.trim().is_empty() {
        return Ok(0.0);
    }
    parse_color(stroke).map(gray_value)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Keep `current` when `parsed` fails, logging what was ignored.
fn or_default<T>(parsed: Result<T, StyleError>, current: T) -> T {
    parsed.unwrap_or_else(|err| {
        tracing::debug!("Ignoring style fragment: {}", err);
        current
    })
}

/// Power implied by the stroke width alone: 1 unit of width is full power.
pub fn width_power(stroke_width: &str) -> Option<f64> {
    let width = parse_length("stroke-width", stroke_width).ok()?;
    (width > 0.0).then(|| width.min(1.0))
}

/// Derive laser power and speed multiplier from a curve's style payload.
pub fn derive_laser_settings(style: &StrokeStyle) -> LaserSettings {
    let mut opacity = 1.0;
    let mut gray = 0.0;
    let mut speed_multiplier = 1.0;

    if let Some(power) = width_power(&style.stroke_width) {
        tracing::debug!(
            width_power = power,
            "Stroke width power superseded by stroke color"
        );
    }

    gray = or_default(stroke_gray(&style.stroke), gray);

    if style.has_style() {
        match parse_style(&style.style) {
            Ok(map) => {
                let opacity_value = map.get("opacity").or_else(|| map.get("stroke-opacity"));
                if let Some(value) = opacity_value {
                    opacity = or_default(parse_number("opacity", value), opacity);
                }
                if let Some(value) = map.get("stroke") {
                    gray = or_default(parse_color(value).map(gray_value), gray);
                }
                if let Some(value) = map.get("stroke-width") {
                    speed_multiplier = or_default(
                        parse_length("stroke-width", value).map(|w| 1.0 - w),
                        speed_multiplier,
                    );
                }
            }
            Err(err) => tracing::debug!("Ignoring unparsable style '{}': {}", style.style, err),
        }
    }

    LaserSettings {
        laser_power: opacity - round4(gray * GRAY_WEIGHT),
        speed_multiplier,
    }
}
