//! Angle helpers: azimuth normalisation and degrees-minutes-seconds.

use std::f64::consts::{PI, TAU};
use std::fmt;

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Arc-seconds to radians.
pub fn arcsec_to_rad(arcsec: f64) -> f64 {
    arcsec / (180.0 * 3600.0) * PI
}

/// Wrap an azimuth into [0, 2π).
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let wrapped = azimuth.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Reverse direction of `azimuth`, wrapped into [0, 2π).
pub fn back_azimuth(azimuth: f64) -> f64 {
    normalize_azimuth(azimuth + PI)
}

/// An angle split into degrees, minutes and seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    pub fn new(negative: bool, degrees: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            negative,
            degrees,
            minutes,
            seconds,
        }
    }

    pub fn from_degrees(value: f64) -> Self {
        let total = value.abs() * 3600.0;
        Self::from_abs_seconds(value < 0.0, total)
    }

    pub fn from_radians(value: f64) -> Self {
        Self::from_degrees(value.to_degrees())
    }

    fn from_abs_seconds(negative: bool, total: f64) -> Self {
        let degrees = (total / 3600.0).floor();
        let rest = total - degrees * 3600.0;
        let minutes = (rest / 60.0).floor();
        let seconds = (rest - minutes * 60.0).max(0.0);
        Self {
            negative,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    /// Signed decimal degrees.
    pub fn to_degrees(&self) -> f64 {
        let value =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -value
        } else {
            value
        }
    }

    /// Unsigned `DD°MM'SS.sss"` text; seconds rounded to `seconds_digits`
    /// with carry into minutes and degrees.
    pub fn format(&self, seconds_digits: usize) -> String {
        let scale = 10f64.powi(seconds_digits as i32);
        let total = self.degrees as f64 * 3600.0 + self.minutes as f64 * 60.0 + self.seconds;
        let rounded = Self::from_abs_seconds(self.negative, (total * scale).round() / scale);
        let width = if seconds_digits == 0 {
            2
        } else {
            seconds_digits + 3
        };
        format!(
            "{}°{:02}'{:0width$.prec$}\"",
            rounded.degrees,
            rounded.minutes,
            rounded.seconds,
            width = width,
            prec = seconds_digits
        )
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.format(f.precision().unwrap_or(3)))
    }
}
