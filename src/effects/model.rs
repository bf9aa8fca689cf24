use std::fmt;

use serde_json::{Map, Value, json};

use crate::{
    effects::{blur, color, noise, sharpen, vignette},
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
    },
};

/// Closed set of effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Brightness, contrast, gamma, saturation, hue and temperature.
    ColorCorrection,
    /// Gaussian, motion or radial blur.
    Blur,
    /// Unsharp mask.
    Sharpen,
    /// Additive per-pixel noise.
    Noise,
    /// Radial darkening toward the edges.
    Vignette,
}

impl EffectKind {
    /// Every kind, in menu order.
    pub const ALL: [EffectKind; 5] = [
        Self::ColorCorrection,
        Self::Blur,
        Self::Sharpen,
        Self::Noise,
        Self::Vignette,
    ];

    /// Persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ColorCorrection => "color_correction",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Noise => "noise",
            Self::Vignette => "vignette",
        }
    }

    /// Human-readable name for menus.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ColorCorrection => "Color Correction",
            Self::Blur => "Blur",
            Self::Sharpen => "Sharpen",
            Self::Noise => "Noise",
            Self::Vignette => "Vignette",
        }
    }

    /// Parse a persisted name (case-insensitive; `-` and `_` are equivalent).
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.name() == norm)
    }

    /// Parameters a freshly created effect of this kind starts with.
    pub fn default_parameters(self) -> Map<String, Value> {
        let v = match self {
            Self::ColorCorrection => json!({
                "brightness": 0.0,
                "contrast": 0.0,
                "saturation": 0.0,
                "hue": 0.0,
                "gamma": 1.0,
                "temperature": 0.0,
            }),
            Self::Blur => json!({
                "radius": 5,
                "type": "gaussian",
                "angle": 0.0,
                "center_x": 50.0,
                "center_y": 50.0,
            }),
            Self::Sharpen => json!({
                "amount": 50.0,
                "radius": 1,
            }),
            Self::Noise => json!({
                "amount": 10.0,
                "type": "gaussian",
                "monochrome": false,
                "seed": 0,
            }),
            Self::Vignette => json!({
                "amount": 50.0,
                "size": 50.0,
            }),
        };
        match v {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-pixel compositing formula used when merging an effect result or a layer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace.
    #[default]
    Normal,
    /// `b * o`.
    Multiply,
    /// `1 - (1 - b)(1 - o)`.
    Screen,
    /// Multiply or screen depending on the base.
    Overlay,
    /// Soft light.
    SoftLight,
    /// Multiply or screen depending on the overlay.
    HardLight,
    /// `b + o`.
    Add,
    /// `b - o`.
    Subtract,
}

fn enabled_by_default() -> bool {
    true
}

fn full_opacity() -> f64 {
    100.0
}

/// One entry of a clip's effect chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Effect {
    /// Which transform to run.
    pub kind: EffectKind,
    /// Disabled effects are skipped entirely.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Effect-specific parameters. Missing entries fall back to the kind's defaults.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// How the effect result is merged onto the running image.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Mix of the effect result over its input, percent.
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

impl Effect {
    /// Enabled effect with the kind's default parameters, normal blending, full opacity.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            enabled: true,
            parameters: kind.default_parameters(),
            blend_mode: BlendMode::Normal,
            opacity: full_opacity(),
        }
    }

    /// Builder-style parameter override.
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Builder-style blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Builder-style opacity (percent).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set one parameter.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<Value>) {
        self.parameters.insert(name.to_string(), value.into());
    }

    /// Raw parameter value, if set.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Run this effect's own transform on `image`.
    ///
    /// Opacity and blend mode are handled by the pipeline, not here.
    pub fn apply(&self, image: &Raster, frame: u64) -> ReelResult<Raster> {
        match self.kind {
            EffectKind::ColorCorrection => {
                color::apply(image, &color::ColorCorrection::from_effect(self)?)
            }
            EffectKind::Blur => blur::apply(image, &blur::BlurParams::from_effect(self)?),
            EffectKind::Sharpen => sharpen::apply(image, &sharpen::SharpenParams::from_effect(self)?),
            EffectKind::Noise => noise::apply(image, &noise::NoiseParams::from_effect(self)?, frame),
            EffectKind::Vignette => {
                vignette::apply(image, &vignette::VignetteParams::from_effect(self)?)
            }
        }
    }

    fn param_or_default(&self, key: &str) -> Option<Value> {
        self.parameters
            .get(key)
            .cloned()
            .or_else(|| self.kind.default_parameters().remove(key))
    }

    pub(crate) fn param_f64(&self, key: &str) -> ReelResult<f64> {
        let Some(v) = self.param_or_default(key) else {
            return Err(ReelError::effect(format!(
                "{}: missing parameter '{key}'",
                self.kind
            )));
        };
        let Some(n) = v.as_f64() else {
            return Err(ReelError::effect(format!(
                "{}: parameter '{key}' must be a number",
                self.kind
            )));
        };
        if !n.is_finite() {
            return Err(ReelError::effect(format!(
                "{}: parameter '{key}' must be finite",
                self.kind
            )));
        }
        Ok(n)
    }

    pub(crate) fn param_u32(&self, key: &str) -> ReelResult<u32> {
        let n = self.param_f64(key)?;
        if n < 0.0 || n > f64::from(u32::MAX) {
            return Err(ReelError::effect(format!(
                "{}: parameter '{key}' is out of range",
                self.kind
            )));
        }
        Ok(n.round() as u32)
    }

    pub(crate) fn param_u64(&self, key: &str) -> ReelResult<u64> {
        match self.param_or_default(key) {
            Some(v) => v.as_u64().ok_or_else(|| {
                ReelError::effect(format!(
                    "{}: parameter '{key}' must be a non-negative integer",
                    self.kind
                ))
            }),
            None => Ok(0),
        }
    }

    pub(crate) fn param_bool(&self, key: &str) -> ReelResult<bool> {
        match self.param_or_default(key) {
            Some(Value::Bool(b)) => Ok(b),
            Some(_) => Err(ReelError::effect(format!(
                "{}: parameter '{key}' must be a boolean",
                self.kind
            ))),
            None => Ok(false),
        }
    }

    pub(crate) fn param_str(&self, key: &str) -> ReelResult<String> {
        match self.param_or_default(key) {
            Some(Value::String(s)) => Ok(s.trim().to_ascii_lowercase()),
            Some(_) => Err(ReelError::effect(format!(
                "{}: parameter '{key}' must be a string",
                self.kind
            ))),
            None => Err(ReelError::effect(format!(
                "{}: missing parameter '{key}'",
                self.kind
            ))),
        }
    }
}

/// Factory by persisted name; `None` for unknown kinds.
pub fn create_effect(name: &str) -> Option<Effect> {
    EffectKind::from_name(name).map(Effect::new)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/model.rs"]
mod tests;
