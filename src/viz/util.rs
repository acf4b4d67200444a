//! Utility functions for visualization: fonts, tick formatting, text measuring.

use crate::config::{FONT_ENV, TICK_DATE_FORMAT};
use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use num_format::{Locale, ToFormattedString};
use plotters::style::FontStyle;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Fonts looked up when `HOSPI_FONT` is unset.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT: OnceLock<Result<PathBuf, String>> = OnceLock::new();

fn font_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(FONT_ENV) {
        return Some(PathBuf::from(p));
    }
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register a "sans-serif" font for the `ab_glyph` text path, once per process.
///
/// `ab_glyph` doesn't discover OS fonts, so the bytes are loaded from
/// `HOSPI_FONT` or a well-known system location.
pub fn ensure_fonts_registered() -> Result<()> {
    let outcome = FONT.get_or_init(|| {
        let path = font_path().ok_or_else(|| {
            format!("no usable font found; set {FONT_ENV} to a .ttf/.otf file")
        })?;
        let bytes = std::fs::read(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        // Lives for the rest of the process, as plotters requires.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        for style in [FontStyle::Normal, FontStyle::Bold] {
            plotters::style::register_font("sans-serif", style, bytes)
                .map_err(|_| format!("{} is not a valid font", path.display()))?;
        }
        debug!("registered font {}", path.display());
        Ok(path)
    });
    match outcome {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!("{e}");
            Err(anyhow!("{e}"))
        }
    }
}

/// Whether chart text can be drawn in this environment.
pub fn fonts_available() -> bool {
    ensure_fonts_registered().is_ok()
}

/// Whole number with `,` thousands separators (`30,000`).
pub fn fmt_count(v: f64) -> String {
    (v.round() as i64).to_formatted_string(&Locale::en)
}

/// x coordinate of a day: days elapsed since `origin`.
pub fn day_offset(origin: NaiveDate, d: NaiveDate) -> f64 {
    (d - origin).num_days() as f64
}

/// Month-day label of an x coordinate.
pub fn fmt_day(origin: NaiveDate, x: f64) -> String {
    (origin + Duration::days(x.round() as i64))
        .format(TICK_DATE_FORMAT)
        .to_string()
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_thousands_separator() {
        assert_eq!(fmt_count(32292.0), "32,292");
        assert_eq!(fmt_count(0.0), "0");
    }

    #[test]
    fn day_labels_roundtrip() {
        let o = NaiveDate::from_ymd_opt(2020, 3, 18).unwrap();
        let d = NaiveDate::from_ymd_opt(2020, 4, 7).unwrap();
        let x = day_offset(o, d);
        assert_eq!(x, 20.0);
        assert_eq!(fmt_day(o, x), "04-07");
    }
}
