use eframe::egui::Color32;
use palette::{IntoColor, Lab, Mix, Srgb};

use crate::config::{AirQualityBand, PresentationPolicy};

// ---------------------------------------------------------------------------
// Hex colours from the presentation policy
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (or `#rgb`) into a colour.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = hex.trim().parse().ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Parse a policy colour, falling back to grey for anything unparsable.
pub fn policy_color(hex: &str) -> Color32 {
    parse_hex(hex).unwrap_or(Color32::GRAY)
}

pub fn band_color(policy: &PresentationPolicy, band: AirQualityBand) -> Color32 {
    policy_color(policy.band_hex(band))
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation coefficients
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

fn to_lab((r, g, b): (u8, u8, u8)) -> Lab {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).into_color()
}

fn to_color32(lab: Lab) -> Color32 {
    let rgb: Srgb = lab.into_color();
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

/// Blue → grey → red, interpolated in Lab for `r` in `[-1, 1]`.
pub fn correlation_color(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let neutral = to_lab(NEUTRAL);
    let lab = if r < 0.0 {
        neutral.mix(to_lab(COOL), -r)
    } else {
        neutral.mix(to_lab(WARM), r)
    };
    to_color32(lab)
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Color32, b: (u8, u8, u8)) -> bool {
        let d = |x: u8, y: u8| (x as i32 - y as i32).abs() <= 2;
        d(a.r(), b.0) && d(a.g(), b.1) && d(a.b(), b.2)
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_hex("#90CAF9"), Some(Color32::from_rgb(0x90, 0xCA, 0xF9)));
        assert_eq!(parse_hex("ff0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_hex("not a colour"), None);
        assert_eq!(policy_color("#zzzzzz"), Color32::GRAY);
    }

    #[test]
    fn correlation_scale_endpoints() {
        assert!(near(correlation_color(-1.0), COOL));
        assert!(near(correlation_color(0.0), NEUTRAL));
        assert!(near(correlation_color(1.0), WARM));
        assert!(near(correlation_color(7.0), WARM));
    }

    #[test]
    fn band_colours_follow_policy() {
        let policy = PresentationPolicy::default();
        assert_eq!(
            band_color(&policy, AirQualityBand::Poor),
            parse_hex(&policy.colors.poor).unwrap()
        );
    }

    #[test]
    fn contrast_text_picks_readable_colour() {
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }
}
