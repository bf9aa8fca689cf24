use crate::{
    effects::{
        blend::{blend, mix},
        model::Effect,
    },
    foundation::{
        core::Raster,
        error::{ReelError, ReelResult},
    },
};

/// Run an effect chain over `image` for `frame`.
///
/// Disabled effects are skipped. An effect that fails is logged and skipped for this call only;
/// the chain continues with the running image unchanged.
pub fn apply_effects(image: &Raster, effects: &[Effect], frame: u64) -> Raster {
    let mut running = image.clone();
    for (index, effect) in effects.iter().enumerate() {
        if !effect.enabled {
            continue;
        }
        match apply_one(&running, effect, frame) {
            Ok(next) => running = next,
            Err(err) => {
                tracing::warn!(index, kind = %effect.kind, error = %err, "effect failed; skipping");
            }
        }
    }
    running
}

/// Apply a single enabled effect including its opacity and blend mode.
pub fn apply_one(running: &Raster, effect: &Effect, frame: u64) -> ReelResult<Raster> {
    let processed = effect.apply(running, frame)?;
    if !processed.same_size(running) {
        return Err(ReelError::effect(format!(
            "{} changed the image size",
            effect.kind
        )));
    }
    if !effect.opacity.is_finite() {
        return Err(ReelError::effect(format!(
            "{}: opacity must be finite",
            effect.kind
        )));
    }
    let processed = if effect.opacity < 100.0 {
        mix(running, &processed, (effect.opacity / 100.0) as f32)?
    } else {
        processed
    };
    blend(running, &processed, effect.blend_mode)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
