//! Theme-dependent colours for the background.
//!
//! Two tuning sets exist, [`Preset::Aurora`] and [`Preset::Ribbon`]. They
//! share the wave shape and the dark palette and differ in light mode: Aurora
//! lays a pastel wash under five bright waves, Ribbon a faint warm tint under
//! three thin ones. Nothing is interpolated between themes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;
use crate::theme::Theme;

/// A CSS `hsla()` colour. Hue is in degrees and may run past 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.h.rem_euclid(360.0),
            self.s,
            self.l,
            self.a
        )
    }
}

/// The four per-theme parameters everything else is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub base_hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl ThemePalette {
    fn tint(&self, hue: f64, alpha: f64) -> Hsla {
        Hsla::new(hue, self.saturation, self.lightness, alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Hsla,
}

/// Three-stop linear gradient between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: [GradientStop; 3],
}

/// Stroke style of one wave path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Hsla,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Aurora,
    Ribbon,
}

// Pastel wash the Aurora preset lays down in light mode.
const AURORA_LIGHT_WASH: [Hsla; 3] = [
    Hsla::new(210.0, 80.0, 95.0, 1.0),
    Hsla::new(260.0, 60.0, 92.0, 1.0),
    Hsla::new(300.0, 50.0, 95.0, 1.0),
];

impl Preset {
    pub fn wave_count(self, theme: Theme) -> usize {
        match (self, theme) {
            (Preset::Ribbon, Theme::Light) => 3,
            _ => 5,
        }
    }

    pub fn line_width(self, theme: Theme) -> f64 {
        match (self, theme) {
            (Preset::Ribbon, Theme::Light) => 1.0,
            _ => 2.0,
        }
    }

    pub fn palette(self, theme: Theme) -> ThemePalette {
        let (base_hue, saturation, lightness, alpha) = match (self, theme) {
            (Preset::Aurora, Theme::Light) => (220.0, 70.0, 90.0, 0.4),
            (Preset::Ribbon, Theme::Light) => (30.0, 25.0, 75.0, 0.08),
            (_, Theme::Dark) => (200.0, 60.0, 15.0, 0.15),
        };
        ThemePalette {
            base_hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Background gradient for one frame, diagonal across the surface.
    pub fn gradient(self, theme: Theme, t: f64, width: f64, height: f64) -> LinearGradient {
        let colors = if self == Preset::Aurora && theme == Theme::Light {
            AURORA_LIGHT_WASH
        } else {
            let p = self.palette(theme);
            [
                p.tint(p.base_hue, 0.0),
                p.tint(p.base_hue + t * 0.5, p.alpha),
                p.tint(p.base_hue, 0.0),
            ]
        };
        LinearGradient {
            from: (0.0, 0.0),
            to: (width, height),
            stops: [
                GradientStop { offset: 0.0, color: colors[0] },
                GradientStop { offset: 0.5, color: colors[1] },
                GradientStop { offset: 1.0, color: colors[2] },
            ],
        }
    }

    /// Stroke of wave `index` at time `t`.
    pub fn stroke(self, theme: Theme, index: usize, t: f64) -> Stroke {
        let p = self.palette(theme);
        let i = index as f64;
        let color = match (self, theme) {
            (Preset::Aurora, Theme::Light) => {
                Hsla::new((p.base_hue + i * 30.0 + t * 10.0) % 360.0, 60.0, 70.0, 0.3)
            }
            (Preset::Ribbon, Theme::Light) => {
                Hsla::new(p.base_hue + t + i * 50.0, p.saturation + 10.0, 60.0, 0.02)
            }
            (_, Theme::Dark) => {
                Hsla::new(p.base_hue + t + i * 50.0, p.saturation + 10.0, 50.0, 0.05)
            }
        };
        Stroke {
            color,
            width: self.line_width(theme),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aurora" => Ok(Preset::Aurora),
            "ribbon" => Ok(Preset::Ribbon),
            other => Err(Error::UnknownPreset(other.to_owned())),
        }
    }
}
