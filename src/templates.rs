//! Template point generators.
//!
//! Each [`Template`] maps to one generator strategy through [`GENERATORS`].
//! Generators write `count * 3` interleaved xyz floats into a caller-provided
//! buffer, so the animator can resample a template without allocating.

use crate::{
    constants::{FLOWER_DEPTH_SCALE, FLOWER_PETALS, FLOWER_RADIUS, SPHERE_RADIUS},
    Error, Result,
};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::{
    f64::consts::{PI, TAU},
    fmt,
    str::FromStr,
};

/// Named target shapes for the particle cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Sphere,
    Flower,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::Sphere, Template::Flower];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Flower => "flower",
        }
    }

    /// Generator strategy registered for this template
    #[must_use]
    pub fn generator(self) -> Generator {
        GENERATORS
            .iter()
            .find(|(template, _)| *template == self)
            .map_or(fill_sphere as Generator, |(_, generator)| *generator)
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown template: {s}")))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fills an interleaved xyz buffer; the RNG is ignored by deterministic shapes
pub type Generator = fn(&mut [f32], &mut dyn RngCore);

/// Template to generator lookup
pub const GENERATORS: [(Template, Generator); 2] = [
    (Template::Sphere, fill_sphere),
    (Template::Flower, fill_flower),
];

/// Spherical spiral of radius 2. Identical output for identical sizes.
#[allow(clippy::cast_precision_loss)] // Point counts are far below 2^52
#[allow(clippy::cast_possible_truncation)] // Output buffers are f32
pub fn fill_sphere(points: &mut [f32], _rng: &mut dyn RngCore) {
    let count = points.len() / 3;
    let n = count as f64;
    let spiral = (n * PI).sqrt();

    for (i, point) in points.chunks_exact_mut(3).enumerate() {
        let phi = (-1.0 + (2.0 * i as f64) / n).acos();
        let theta = spiral * phi;

        point[0] = (SPHERE_RADIUS * theta.cos() * phi.sin()) as f32;
        point[1] = (SPHERE_RADIUS * theta.sin() * phi.sin()) as f32;
        point[2] = (SPHERE_RADIUS * phi.cos()) as f32;
    }
}

/// Five-petal rose curve swept over a flattened sphere. Freshly sampled on
/// every call.
#[allow(clippy::cast_possible_truncation)] // Output buffers are f32
pub fn fill_flower(points: &mut [f32], rng: &mut dyn RngCore) {
    for point in points.chunks_exact_mut(3) {
        let t = rng.random::<f64>() * TAU;
        let p = rng.random::<f64>() * PI;
        let r = (FLOWER_PETALS * t).sin() * FLOWER_RADIUS;

        point[0] = (r * t.cos() * p.sin()) as f32;
        point[1] = (r * t.sin() * p.sin()) as f32;
        point[2] = (r * p.cos() * FLOWER_DEPTH_SCALE) as f32;
    }
}

/// Immutable point set for one template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePointSet {
    template: Template,
    points: Vec<f32>,
}

impl TemplatePointSet {
    /// Generate `count` points for `template`.
    #[must_use]
    pub fn generate(template: Template, count: usize, rng: &mut dyn RngCore) -> Self {
        let mut points = vec![0.0_f32; count * 3];
        (template.generator())(&mut points, rng);
        Self { template, points }
    }

    /// Resample in place; the point count never changes.
    pub fn regenerate(&mut self, template: Template, rng: &mut dyn RngCore) {
        (template.generator())(&mut self.points, rng);
        self.template = template;
    }

    #[must_use]
    pub fn template(&self) -> Template {
        self.template
    }

    /// Number of 3D points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interleaved xyz coordinates
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.points
    }

    /// Points as xyz triples
    pub fn iter(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.points.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}
