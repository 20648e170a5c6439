//! Geometry and material state shared by every specimen model.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::SpecimenParameters;
use crate::section::{flexural_rigidity, inertia};

/// How the elastic-constant tuple is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Nine engineering constants `[E1, E2, E3, ν12, ν13, ν23, G12, G13, G23]`.
    #[default]
    Anisotropic,
    /// Two constants `[E, ν]`; the shear modulus follows from `E / (2 (1 + ν))`.
    Isotropic,
}

impl MaterialKind {
    /// Minimum length of the elastic-constant tuple.
    pub fn required_constants(self) -> usize {
        match self {
            MaterialKind::Anisotropic => 9,
            MaterialKind::Isotropic => 2,
        }
    }
}

/// Geometry, material and toughness of one specimen.
///
/// All lengths share one unit system with the moduli (the defaults are in
/// millimetres and megapascals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecimenState {
    /// Half of the specimen span.
    pub half_length: f64,
    pub width: f64,
    /// Thickness of the upper adherend.
    pub thickness_upper: f64,
    /// Thickness of the lower adherend.
    pub thickness_lower: f64,
    /// Thickness of the cohesive zone.
    pub thickness_cohesive: f64,
    pub initial_crack: f64,
    pub elastic_constants: Vec<f64>,
    pub material: MaterialKind,
    /// Critical energy release rate.
    pub fracture_toughness: f64,
    pub name: String,
}

impl Default for SpecimenState {
    fn default() -> Self {
        Self {
            half_length: 50.0,
            width: 25.0,
            thickness_upper: 2.4,
            thickness_lower: 2.4,
            thickness_cohesive: 0.2,
            initial_crack: 60.0,
            elastic_constants: vec![
                109_000.0, 8_819.0, 8_819.0, 0.34, 0.34, 0.38, 4_315.0, 4_315.0, 3_200.0,
            ],
            material: MaterialKind::Anisotropic,
            fracture_toughness: 0.42,
            name: "Job".to_string(),
        }
    }
}

impl SpecimenState {
    /// Overwrite every field carried by a parameter record.
    ///
    /// A record always describes an anisotropic tuple. The toughness is kept
    /// when the record has no `gT`.
    pub fn apply(&mut self, parameters: &SpecimenParameters) -> Result<()> {
        self.half_length = parameters.length * 0.5;
        self.width = parameters.width;
        self.thickness_upper = parameters.thickness_upper;
        self.thickness_lower = parameters.thickness_lower;
        self.thickness_cohesive = parameters.thickness_cohesive;
        self.initial_crack = parameters.crack;
        self.elastic_constants = parameters.elastic_constants()?.to_vec();
        self.material = MaterialKind::Anisotropic;
        if let Some(toughness) = parameters.fracture_toughness {
            self.fracture_toughness = toughness;
        }
        self.name = parameters.job_id.to_string();
        Ok(())
    }
}

/// Stiffness terms derived from a [`SpecimenState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stiffness {
    /// Longitudinal modulus.
    pub e1: f64,
    /// Transverse shear modulus.
    pub g13: f64,
    /// Second moment of area of the upper arm.
    pub inertia_upper: f64,
    /// Second moment of area of the lower arm.
    pub inertia_lower: f64,
    /// Flexural rigidity of the upper arm.
    pub rigidity_upper: f64,
    /// Flexural rigidity of the lower arm.
    pub rigidity_lower: f64,
}

impl Stiffness {
    pub fn derive(state: &SpecimenState) -> Result<Self> {
        let constants = &state.elastic_constants;
        let required = state.material.required_constants();
        if constants.len() < required {
            return Err(ModelError::ElasticConstants {
                kind: state.material,
                expected: required,
                received: constants.len(),
            });
        }

        let e1 = constants[0];
        let g13 = match state.material {
            MaterialKind::Anisotropic => constants[8],
            MaterialKind::Isotropic => e1 / (2.0 * (1.0 + constants[1])),
        };

        Ok(Self {
            e1,
            g13,
            inertia_upper: inertia(state.width, state.thickness_upper),
            inertia_lower: inertia(state.width, state.thickness_lower),
            rigidity_upper: flexural_rigidity(e1, state.width, state.thickness_upper),
            rigidity_lower: flexural_rigidity(e1, state.width, state.thickness_lower),
        })
    }
}
