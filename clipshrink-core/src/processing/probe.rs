//! Frame rate probing.
//!
//! ffprobe reports `r_frame_rate` either as a rational (`30000/1001`) or as a
//! plain number. A probe never fails the pipeline: anything that cannot be
//! turned into a usable rate becomes `None` and the encoder picks its own.

use crate::external::ProbeExecutor;

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A positive, finite frames-per-second value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Returns `None` for zero, negative, NaN or infinite values.
    #[must_use]
    pub fn new(fps: f64) -> Option<Self> {
        (fps.is_finite() && fps > 0.0).then_some(Self(fps))
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the raw text printed by the frame rate query.
///
/// Only the first non-empty line is considered; surrounding whitespace and
/// trailing CSV separators are ignored.
///
/// ```rust
/// use clipshrink_core::processing::probe::parse_frame_rate;
///
/// let ntsc = parse_frame_rate("30000/1001\n").unwrap();
/// assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
/// assert_eq!(parse_frame_rate("25").unwrap().as_f64(), 25.0);
/// assert!(parse_frame_rate("abc").is_none());
/// ```
#[must_use]
pub fn parse_frame_rate(raw: &str) -> Option<FrameRate> {
    let value = raw
        .lines()
        .map(|line| line.trim().trim_end_matches(',').trim())
        .find(|line| !line.is_empty())?;

    if let Some((numerator, denominator)) = value.split_once('/') {
        let numerator: i64 = numerator.trim().parse().ok()?;
        let denominator: i64 = denominator.trim().parse().ok()?;
        if denominator == 0 {
            return None;
        }
        FrameRate::new(numerator as f64 / denominator as f64)
    } else {
        FrameRate::new(value.parse::<f64>().ok()?)
    }
}

/// Queries and parses the frame rate of `input_path`.
///
/// Tool failures and unparseable output are logged and yield `None`.
pub fn probe_frame_rate<P: ProbeExecutor>(prober: &P, input_path: &Path) -> Option<FrameRate> {
    let raw = match prober.query_frame_rate(input_path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!(
                "Frame rate probe failed for {}: {}. Letting the encoder choose.",
                input_path.display(),
                e
            );
            return None;
        }
    };

    let rate = parse_frame_rate(&raw);
    match rate {
        Some(rate) => log::debug!("Probed frame rate for {}: {}", input_path.display(), rate),
        None => log::warn!(
            "Could not parse frame rate '{}' for {}. Letting the encoder choose.",
            raw.trim(),
            input_path.display()
        ),
    }
    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_rates() {
        let rate = parse_frame_rate("30000/1001").unwrap();
        assert!((rate.as_f64() - 29.970_029_97).abs() < 1e-6);
        assert_eq!(parse_frame_rate("25/1").unwrap().as_f64(), 25.0);
        assert_eq!(parse_frame_rate("50/2").unwrap().as_f64(), 25.0);
    }

    #[test]
    fn decimal_rates() {
        assert_eq!(parse_frame_rate("25").unwrap().as_f64(), 25.0);
        assert_eq!(parse_frame_rate("23.976").unwrap().as_f64(), 23.976);
        assert_eq!(parse_frame_rate("  59.94 \n").unwrap().as_f64(), 59.94);
    }

    #[test]
    fn trailing_separator_and_extra_lines() {
        assert_eq!(parse_frame_rate("25/1,\n").unwrap().as_f64(), 25.0);
        assert_eq!(parse_frame_rate("\n30/1\n60/1\n").unwrap().as_f64(), 30.0);
    }

    #[test]
    fn unusable_values_are_absent() {
        assert!(parse_frame_rate("abc").is_none());
        assert!(parse_frame_rate("").is_none());
        assert!(parse_frame_rate("0/0").is_none());
        assert!(parse_frame_rate("30/0").is_none());
        assert!(parse_frame_rate("0").is_none());
        assert!(parse_frame_rate("-25").is_none());
        assert!(parse_frame_rate("nan").is_none());
        assert!(parse_frame_rate("inf").is_none());
        assert!(parse_frame_rate("30000/abc").is_none());
        assert!(parse_frame_rate("29.97/1").is_none());
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(FrameRate::new(25.0).unwrap().to_string(), "25");
        assert_eq!(FrameRate::new(29.97).unwrap().to_string(), "29.97");
    }
}
