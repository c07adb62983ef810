use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const GAMMA: f32 = 0.45;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Thermal,
    Electric,
    Spectral,
    Neon,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Thermal, Theme::Electric, Theme::Spectral, Theme::Neon];

    pub fn key(self) -> &'static str {
        match self {
            Theme::Thermal => "thermal",
            Theme::Electric => "electric",
            Theme::Spectral => "spectral",
            Theme::Neon => "neon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Thermal => "Thermal (Red/Gold)",
            Theme::Electric => "Electric (Blue/Cyan)",
            Theme::Spectral => "Spectral (Rainbow)",
            Theme::Neon => "Cyber Neon (Pink/Lime)",
        }
    }

    /// Legend stops matching the color ramp.
    pub fn gradient(self) -> Gradient {
        let stops: &[(u8, &'static str)] = match self {
            Theme::Thermal => &[(0, "#000"), (33, "#330000"), (66, "#cc0000"), (100, "#ffff00")],
            Theme::Electric => &[(0, "#000"), (33, "#1a0033"), (66, "#00ccff"), (100, "#ffffff")],
            Theme::Spectral => &[(0, "#0000ff"), (50, "#00ff00"), (100, "#ff0000")],
            Theme::Neon => &[(0, "#000"), (50, "#ff00ff"), (100, "#ccff00")],
        };
        Gradient {
            stops: stops
                .iter()
                .map(|&(percent, color)| GradientStop { percent, color })
                .collect(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.key() == s)
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradientStop {
    pub percent: u8,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Horizontal CSS `linear-gradient` for the legend bar.
    pub fn to_css(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|stop| format!("{} {}%", stop.color, stop.percent))
            .collect::<Vec<_>>()
            .join(", ");
        format!("linear-gradient(90deg, {stops})")
    }
}

/// The theme currently applied to clouds and the legend.
///
/// Owned by whoever drives rendering; recolor passes copy the [`Theme`] out
/// so a pass always sees a single theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeSelection {
    current: Theme,
}

impl ThemeSelection {
    pub fn new(theme: Theme) -> Self {
        Self { current: theme }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switches to the theme keyed `name`. Unknown names leave the selection
    /// untouched and return false.
    pub fn set_theme(&mut self, name: &str) -> bool {
        match name.parse::<Theme>() {
            Ok(theme) => {
                self.current = theme;
                true
            }
            Err(_) => false,
        }
    }

    pub fn gradient(&self) -> Gradient {
        self.current.gradient()
    }
}

/// Maps a normalized density to a color under `theme`.
///
/// The input is clamped to [0, 1] and brightened with a 0.45 gamma. The
/// spectral ramp adds a 0.5 highlight above 0.8 without clamping, so its
/// channels can reach 1.5.
pub fn heatmap_color(prob: f32, theme: Theme) -> Rgb {
    let val = prob.clamp(0.0, 1.0).powf(GAMMA);

    match theme {
        Theme::Thermal => thermal(val),
        Theme::Electric => electric(val),
        Theme::Spectral => spectral(val),
        Theme::Neon => neon(val),
    }
}

fn thermal(val: f32) -> Rgb {
    if val < 0.2 {
        Rgb::new(val * 0.5, 0.0, 0.5 + val * 2.0)
    } else if val < 0.5 {
        let loc = (val - 0.2) / 0.3;
        Rgb::new(loc, 0.0, 0.2 * (1.0 - loc))
    } else if val < 0.8 {
        let loc = (val - 0.5) / 0.3;
        Rgb::new(1.0, loc, 0.0)
    } else {
        let loc = (val - 0.8) / 0.2;
        Rgb::new(1.0, 1.0, loc)
    }
}

fn electric(val: f32) -> Rgb {
    if val < 0.5 {
        Rgb::new(val * 0.8, 0.0, 0.5 + val)
    } else {
        Rgb::new(0.4 + (val - 0.5), (val - 0.5) * 2.0, 1.0)
    }
}

fn spectral(val: f32) -> Rgb {
    let hue = (1.0 - val) * 240.0;
    let base = if hue < 60.0 {
        Rgb::new(1.0, hue / 60.0, 0.0)
    } else if hue < 120.0 {
        Rgb::new((120.0 - hue) / 60.0, 1.0, 0.0)
    } else if hue < 180.0 {
        Rgb::new(0.0, 1.0, (hue - 120.0) / 60.0)
    } else {
        Rgb::new(0.0, (240.0 - hue) / 60.0, 1.0)
    };

    if val > 0.8 {
        Rgb::new(base.r + 0.5, base.g + 0.5, base.b + 0.5)
    } else {
        base
    }
}

fn neon(val: f32) -> Rgb {
    if val < 0.3 {
        Rgb::new(val * 3.0, 0.0, val * 3.0)
    } else if val < 0.6 {
        Rgb::new(0.9, (val - 0.3) * 3.0, 0.9 - (val - 0.3) * 3.0)
    } else {
        Rgb::new(0.9 - (val - 0.6), 1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(actual: Rgb, expected: [f32; 3]) {
        let diff = actual
            .to_array()
            .iter()
            .zip(expected)
            .map(|(a, e)| (a - e).abs())
            .fold(0.0_f32, f32::max);
        assert!(diff < 1e-5, "{actual:?} != {expected:?}");
    }

    #[test]
    fn thermal_endpoints() {
        assert_rgb(heatmap_color(0.0, Theme::Thermal), [0.0, 0.0, 0.5]);
        assert_rgb(heatmap_color(1.0, Theme::Thermal), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn input_is_clamped() {
        for theme in Theme::ALL {
            assert_eq!(heatmap_color(-3.0, theme), heatmap_color(0.0, theme));
            assert_eq!(heatmap_color(7.5, theme), heatmap_color(1.0, theme));
        }
    }

    #[test]
    fn gamma_brightens_low_density() {
        // 0.2^0.45 is just above 0.48, inside the second thermal band.
        let color = heatmap_color(0.2, Theme::Thermal);
        let loc = (0.2_f32.powf(0.45) - 0.2) / 0.3;
        assert_rgb(color, [loc, 0.0, 0.2 * (1.0 - loc)]);
    }

    #[test]
    fn electric_and_neon_endpoints() {
        assert_rgb(heatmap_color(0.0, Theme::Electric), [0.0, 0.0, 0.5]);
        assert_rgb(heatmap_color(1.0, Theme::Electric), [0.9, 1.0, 1.0]);
        assert_rgb(heatmap_color(0.0, Theme::Neon), [0.0, 0.0, 0.0]);
        assert_rgb(heatmap_color(1.0, Theme::Neon), [0.5, 1.0, 0.0]);
    }

    #[test]
    fn spectral_highlight_overflows_unit_range() {
        // Kept on purpose: the highlight is additive and never clamped.
        let top = heatmap_color(1.0, Theme::Spectral);
        assert_rgb(top, [1.5, 0.5, 0.5]);
        assert!(top.r > 1.0);

        assert_rgb(heatmap_color(0.0, Theme::Spectral), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let mut selection = ThemeSelection::default();
        assert!(selection.set_theme("neon"));
        let before = selection.gradient();

        assert!(!selection.set_theme("bogus"));
        assert!(!selection.set_theme("Neon"));
        assert_eq!(selection.current(), Theme::Neon);
        assert_eq!(selection.gradient(), before);
    }

    #[test]
    fn css_gradients() {
        assert_eq!(
            Theme::Thermal.gradient().to_css(),
            "linear-gradient(90deg, #000 0%, #330000 33%, #cc0000 66%, #ffff00 100%)"
        );
        assert_eq!(
            Theme::Electric.gradient().to_css(),
            "linear-gradient(90deg, #000 0%, #1a0033 33%, #00ccff 66%, #ffffff 100%)"
        );
        assert_eq!(
            Theme::Spectral.gradient().to_css(),
            "linear-gradient(90deg, #0000ff 0%, #00ff00 50%, #ff0000 100%)"
        );
        assert_eq!(
            Theme::Neon.gradient().to_css(),
            "linear-gradient(90deg, #000 0%, #ff00ff 50%, #ccff00 100%)"
        );
    }

    #[test]
    fn theme_keys_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(theme.key().parse::<Theme>(), Ok(theme));
        }
        assert_eq!(ThemeSelection::default().current(), Theme::Thermal);
    }
}
