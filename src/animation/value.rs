/// A keyframe value: a scalar, a fixed-length list, or an opaque non-numeric value.
///
/// Persisted untagged so values round-trip as plain JSON (`12.5`, `[0, 25]`, `"left"`, `true`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric scalar.
    Scalar(f64),
    /// Boolean flag (never interpolated).
    Flag(bool),
    /// Text value (never interpolated).
    Text(String),
    /// Fixed-length list such as a position or a color.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Scalar payload, if this is a scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// List payload, if this is a list.
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Blend `a` toward `b` at (already reshaped) `progress`.
    ///
    /// Scalars blend linearly; equal-length lists blend element-wise, where only scalar pairs
    /// are interpolated and any other pair is a hard cut at `progress < 0.5`. Every other pairing
    /// is a hard cut at `progress < 0.5`.
    pub fn interpolate(a: &Self, b: &Self, progress: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(lerp(*x, *y, progress)),
            (Self::List(xs), Self::List(ys)) if xs.len() == ys.len() => Self::List(
                xs.iter()
                    .zip(ys)
                    .map(|pair| match pair {
                        (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(lerp(*x, *y, progress)),
                        (x, y) => hard_cut(x, y, progress).clone(),
                    })
                    .collect(),
            ),
            _ => hard_cut(a, b, progress).clone(),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn hard_cut<'a>(a: &'a PropertyValue, b: &'a PropertyValue, progress: f64) -> &'a PropertyValue {
    if progress < 0.5 { a } else { b }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<const N: usize> From<[f64; N]> for PropertyValue {
    fn from(v: [f64; N]) -> Self {
        Self::List(v.into_iter().map(Self::Scalar).collect())
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(v: Vec<PropertyValue>) -> Self {
        Self::List(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
