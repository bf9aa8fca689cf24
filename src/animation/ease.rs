use std::fmt;

/// Newton–Raphson iteration budget for the Bézier x→t solve.
pub const BEZIER_MAX_ITERATIONS: usize = 10;
/// Convergence tolerance for the Bézier x→t solve (normalized progress units).
pub const BEZIER_TOLERANCE: f64 = 0.001;

/// Interpolation law applied from a keyframe toward the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Straight linear blend.
    #[default]
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in/out.
    EaseInOut,
    /// Cubic Bézier easing through the keyframe's control points.
    Bezier,
    /// Step: hold the keyframe value until the next keyframe.
    Hold,
}

impl Interpolation {
    /// Every interpolation law, in persisted-name order.
    pub const ALL: [Interpolation; 6] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Bezier,
        Self::Hold,
    ];

    /// Persisted name (`linear`, `ease_in`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::Bezier => "bezier",
            Self::Hold => "hold",
        }
    }

    /// Parse a persisted name. Case and `-`/`_` separators are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|i| i.name() == norm)
    }

    /// Reshape linear segment progress in `(0, 1)` according to this law.
    ///
    /// `Hold` is a step function and is resolved by the caller before reshaping; here it is the
    /// identity.
    pub fn reshape(self, progress: f64, control_points: &ControlPoints) -> f64 {
        match self {
            Self::Linear | Self::Hold => progress,
            Self::EaseIn => progress * progress,
            Self::EaseOut => 1.0 - (1.0 - progress) * (1.0 - progress),
            Self::EaseInOut => {
                if progress < 0.5 {
                    2.0 * progress * progress
                } else {
                    1.0 - 2.0 * (1.0 - progress) * (1.0 - progress)
                }
            }
            Self::Bezier => solve_bezier(progress, control_points),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for Interpolation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Interpolation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl serde::de::Visitor<'_> for NameVisitor {
            type Value = Interpolation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an interpolation name")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Interpolation, E> {
                Ok(Interpolation::from_name(v).unwrap_or_else(|| {
                    tracing::warn!(name = v, "unknown interpolation, falling back to linear");
                    Interpolation::Linear
                }))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Interpolation, E> {
                tracing::warn!(value = v, "non-string interpolation, falling back to linear");
                Ok(Interpolation::Linear)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Interpolation, E> {
                tracing::warn!(value = v, "non-string interpolation, falling back to linear");
                Ok(Interpolation::Linear)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Interpolation, E> {
                tracing::warn!(value = v, "non-string interpolation, falling back to linear");
                Ok(Interpolation::Linear)
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Interpolation, E> {
                tracing::warn!(value = v, "non-string interpolation, falling back to linear");
                Ok(Interpolation::Linear)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Interpolation, E> {
                Ok(Interpolation::Linear)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Interpolation, E> {
                Ok(Interpolation::Linear)
            }
        }

        deserializer.deserialize_any(NameVisitor)
    }
}

/// The two inner control points of a unit cubic Bézier easing curve.
///
/// The curve always starts at `(0, 0)` and ends at `(1, 1)`. Persisted as `[[x1, y1], [x2, y2]]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct ControlPoints {
    /// First control point `(x1, y1)`.
    pub p1: [f64; 2],
    /// Second control point `(x2, y2)`.
    pub p2: [f64; 2],
}

impl ControlPoints {
    /// Build from coordinates.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            p1: [x1, y1],
            p2: [x2, y2],
        }
    }
}

impl Default for ControlPoints {
    fn default() -> Self {
        Self::new(0.25, 0.1, 0.25, 1.0)
    }
}

impl From<[[f64; 2]; 2]> for ControlPoints {
    fn from([p1, p2]: [[f64; 2]; 2]) -> Self {
        Self { p1, p2 }
    }
}

impl From<ControlPoints> for [[f64; 2]; 2] {
    fn from(cp: ControlPoints) -> Self {
        [cp.p1, cp.p2]
    }
}

fn bezier_axis(t: f64, a: f64, b: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * a + 3.0 * mt * t * t * b + t * t * t
}

fn bezier_axis_derivative(t: f64, a: f64, b: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * a + 6.0 * mt * t * (b - a) + 3.0 * t * t * (1.0 - b)
}

/// Map linear progress through the easing curve: find `t` with `x(t) == progress`, return `y(t)`.
///
/// Uses a fixed Newton–Raphson budget; `t` is clamped to `[0, 1]` on every step and the result is
/// clamped to `[0, 1]`.
pub fn solve_bezier(progress: f64, cp: &ControlPoints) -> f64 {
    let [x1, y1] = cp.p1;
    let [x2, y2] = cp.p2;

    let mut t = progress.clamp(0.0, 1.0);
    for _ in 0..BEZIER_MAX_ITERATIONS {
        let x = bezier_axis(t, x1, x2);
        let err = x - progress;
        if err.abs() < BEZIER_TOLERANCE {
            break;
        }
        let dx = bezier_axis_derivative(t, x1, x2);
        if dx.abs() <= BEZIER_TOLERANCE {
            break;
        }
        t = (t - err / dx).clamp(0.0, 1.0);
    }

    bezier_axis(t, y1, y2).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
