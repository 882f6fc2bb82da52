//! Particle morph animator.
//!
//! Owns the live point cloud and, once per rendered frame, pulls every
//! coordinate toward the current template scaled by the hand's expansion.
//! Opening the hand eases in fast with random scatter; closing or holding
//! eases out slowly with none.

use crate::{
    config::AnimationSettings,
    control::ParticleConfig,
    render::FrameView,
    templates::{Template, TemplatePointSet},
    Error, Result,
};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Easing regime chosen from the sign of the expansion change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphPhase {
    /// Expansion grew since the previous tick
    Expanding,
    /// Expansion shrank or held
    Settling,
}

impl MorphPhase {
    #[must_use]
    pub fn from_expansion(expansion: f32, previous: f32) -> Self {
        if expansion > previous {
            Self::Expanding
        } else {
            Self::Settling
        }
    }

    /// Fraction of the remaining distance covered per tick
    #[must_use]
    pub fn lerp_factor(self, settings: &AnimationSettings) -> f32 {
        match self {
            Self::Expanding => settings.expanding_lerp,
            Self::Settling => settings.settling_lerp,
        }
    }

    /// Jitter amplitude for the given expansion
    #[must_use]
    pub fn scatter_amount(self, expansion: f32, settings: &AnimationSettings) -> f32 {
        match self {
            Self::Expanding => expansion * settings.scatter_scale,
            Self::Settling => 0.0,
        }
    }
}

/// Live particle cloud plus the morph target it eases toward
pub struct ParticleAnimator {
    settings: AnimationSettings,
    target: TemplatePointSet,
    current: Vec<f32>,
    previous_expansion: f32,
    phase: MorphPhase,
    rng: StdRng,
}

impl ParticleAnimator {
    /// Create an animator seeded from a freshly generated `template` using OS
    /// entropy for sampling and jitter.
    #[must_use]
    pub fn new(template: Template, count: usize, settings: AnimationSettings) -> Self {
        Self::with_rng(template, count, settings, StdRng::from_os_rng())
    }

    /// Same as [`ParticleAnimator::new`] with a caller-provided RNG
    #[must_use]
    pub fn with_rng(
        template: Template,
        count: usize,
        settings: AnimationSettings,
        mut rng: StdRng,
    ) -> Self {
        let target = TemplatePointSet::generate(template, count, &mut rng);
        Self::from_points(target, settings, rng)
    }

    /// Start from an existing point set; the live cloud begins on the target.
    #[must_use]
    pub fn from_points(target: TemplatePointSet, settings: AnimationSettings, rng: StdRng) -> Self {
        Self {
            settings,
            current: target.as_flat().to_vec(),
            target,
            previous_expansion: 0.0,
            phase: MorphPhase::Settling,
            rng,
        }
    }

    /// Replace the morph target. The live cloud is left where it is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the point count differs from the
    /// live buffer.
    pub fn set_target(&mut self, target: TemplatePointSet) -> Result<()> {
        if target.len() != self.len() {
            return Err(Error::InvalidInput(format!(
                "Template has {} points, animator holds {}",
                target.len(),
                self.len()
            )));
        }
        debug!("Morph target replaced with {} template", target.template());
        self.target = target;
        Ok(())
    }

    /// Resample the target for `template` if it is not already selected.
    pub fn select_template(&mut self, template: Template) {
        if self.target.template() != template {
            debug!("Switching morph target {} -> {}", self.target.template(), template);
            self.target.regenerate(template, &mut self.rng);
        }
    }

    /// Advance the cloud by one frame.
    pub fn tick(&mut self, config: &ParticleConfig) -> MorphPhase {
        self.select_template(config.template);

        let expansion = config.expansion;
        let phase = MorphPhase::from_expansion(expansion, self.previous_expansion);
        let lerp = phase.lerp_factor(&self.settings);
        let scatter = phase.scatter_amount(expansion, &self.settings);
        let expansion_factor = 1.0 + expansion * self.settings.expansion_scale;

        for (current, &base) in self.current.iter_mut().zip(self.target.as_flat()) {
            let jitter = if scatter > 0.0 {
                (self.rng.random::<f32>() - 0.5) * scatter
            } else {
                0.0
            };
            let target = base * expansion_factor + jitter;
            *current += (target - *current) * lerp;
        }

        self.previous_expansion = expansion;
        self.phase = phase;
        phase
    }

    /// Material point size for an expansion value
    #[must_use]
    pub fn point_size(&self, expansion: f32) -> f32 {
        self.settings.point_size_base + expansion * self.settings.point_size_scale
    }

    /// Borrow the render-facing view of the current state
    #[must_use]
    pub fn frame<'a>(&'a self, config: &ParticleConfig, tracking: bool, frame: u64) -> FrameView<'a> {
        FrameView {
            positions: &self.current,
            color: config.color,
            point_size: self.point_size(config.expansion),
            position: config.position,
            template: self.target.template(),
            tracking,
            frame,
        }
    }

    /// Interleaved xyz of the live cloud
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.current
    }

    #[must_use]
    pub fn target(&self) -> &TemplatePointSet {
        &self.target
    }

    #[must_use]
    pub fn previous_expansion(&self) -> f32 {
        self.previous_expansion
    }

    /// Phase used by the most recent tick
    #[must_use]
    pub fn phase(&self) -> MorphPhase {
        self.phase
    }

    /// Number of particles
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
