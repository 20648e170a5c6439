//! Specimen models: reaction force and R-curve reconstruction.
//!
//! A [`Specimen`] owns its state, its derived stiffness and the coefficients of
//! its configuration. Every mutation goes through [`Specimen::setup`], which
//! re-derives everything, so the coefficients always match the state.
//!
//! # Example
//!
//! ```
//! use czm_analytical::{Specimen, SpecimenKind};
//!
//! let specimen = Specimen::new(SpecimenKind::Enf)?;
//! let history = specimen.reaction_force(&[0.5, 1.0, 3.0]);
//! assert_eq!(history.force.len(), 3);
//! # Ok::<(), czm_analytical::ModelError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::polynomial::Polynomial;
use crate::record::{DISPLACEMENT, REACTION_FORCE, Record, SpecimenParameters, series};
use crate::specimen::{SpecimenState, Stiffness};
use crate::theory::{Coefficients, SpecimenKind};

/// Analytical force for each imposed opening displacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionForce {
    #[serde(rename = "Analytical Reaction Force")]
    pub force: Vec<f64>,
}

/// Crack length and fracture resistance at the interior samples of a
/// force-displacement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RCurve {
    #[serde(rename = "Crack Length")]
    pub crack_length: Vec<f64>,
    #[serde(rename = "Fracture Resistance")]
    pub fracture_resistance: Vec<f64>,
}

impl From<ReactionForce> for Record {
    fn from(value: ReactionForce) -> Self {
        let mut record = Record::new();
        record.insert("Analytical Reaction Force".to_string(), Value::from(value.force));
        record
    }
}

impl From<RCurve> for Record {
    fn from(value: RCurve) -> Self {
        let mut record = Record::new();
        record.insert("Crack Length".to_string(), Value::from(value.crack_length));
        record.insert(
            "Fracture Resistance".to_string(),
            Value::from(value.fracture_resistance),
        );
        record
    }
}

/// One fracture specimen of a given configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    state: SpecimenState,
    stiffness: Stiffness,
    coefficients: Coefficients,
}

impl Specimen {
    /// A specimen with the default carbon/epoxy laminate geometry.
    pub fn new(kind: SpecimenKind) -> Result<Self> {
        Self::with_state(kind, SpecimenState::default())
    }

    pub fn with_state(kind: SpecimenKind, state: SpecimenState) -> Result<Self> {
        let stiffness = Stiffness::derive(&state)?;
        let coefficients = Coefficients::derive(kind, &state, &stiffness);
        Ok(Self {
            state,
            stiffness,
            coefficients,
        })
    }

    pub fn kind(&self) -> SpecimenKind {
        self.coefficients.kind()
    }

    pub fn state(&self) -> &SpecimenState {
        &self.state
    }

    pub fn stiffness(&self) -> &Stiffness {
        &self.stiffness
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Apply `parameters` (if any) and re-derive stiffness and coefficients.
    ///
    /// On error the specimen is left unchanged.
    pub fn setup(&mut self, parameters: Option<&SpecimenParameters>) -> Result<()> {
        let mut state = self.state.clone();
        if let Some(parameters) = parameters {
            state.apply(parameters)?;
        }
        *self = Self::with_state(self.kind(), state)?;
        Ok(())
    }

    pub fn setup_from_record(&mut self, record: &Record) -> Result<()> {
        let parameters = SpecimenParameters::from_record(record)?;
        self.setup(Some(&parameters))
    }

    pub fn compliance(&self, crack: f64) -> f64 {
        self.coefficients.theory().compliance(crack)
    }

    pub fn resistance(&self, force: f64, crack: f64) -> f64 {
        self.coefficients.theory().resistance(force, crack)
    }

    /// Stable crack length at opening displacement `displacement`.
    ///
    /// The largest positive root of the crack-growth polynomial, never shorter
    /// than the initial crack.
    pub fn crack_length(&self, displacement: f64) -> f64 {
        let roots = self
            .coefficients
            .theory()
            .growth_polynomial(displacement)
            .positive_real_roots();
        let crack = roots
            .into_iter()
            .fold(self.state.initial_crack, f64::max);
        log::trace!("u = {displacement:e}: crack length {crack}");
        crack
    }

    pub fn reaction_force_at(&self, displacement: f64) -> f64 {
        displacement / self.compliance(self.crack_length(displacement))
    }

    pub fn reaction_force(&self, displacement: &[f64]) -> ReactionForce {
        ReactionForce {
            force: displacement
                .iter()
                .map(|&u| self.reaction_force_at(u))
                .collect(),
        }
    }

    /// Set the specimen up from `record`, then evaluate its `Displacement` series.
    pub fn reaction_force_from_record(&mut self, record: &Record) -> Result<ReactionForce> {
        self.setup_from_record(record)?;
        let displacement = series(record, DISPLACEMENT)?;
        Ok(self.reaction_force(&displacement))
    }

    /// Crack length whose compliance equals `compliance`.
    ///
    /// Picks the positive root closest to `previous`; keeps `previous` when the
    /// inversion has no admissible root. Several positive roots only occur
    /// when the compliance is not monotone in the crack length.
    pub fn invert_compliance(&self, compliance: f64, previous: f64) -> f64 {
        if !compliance.is_finite() {
            log::debug!("non-finite compliance; keeping crack length {previous}");
            return previous;
        }
        let inverse = self
            .coefficients
            .theory()
            .compliance_polynomial()
            .shifted(compliance);
        match closest_positive_root(&inverse, previous) {
            Some(crack) => crack,
            None => {
                log::debug!(
                    "compliance {compliance:e} has no admissible crack; keeping {previous}"
                );
                previous
            }
        }
    }

    /// Reconstruct the R-curve from a measured force-displacement history.
    ///
    /// The first and last samples are dropped; each interior secant compliance
    /// is inverted for the crack length, at which the resistance is evaluated.
    pub fn r_curve(&self, displacement: &[f64], force: &[f64]) -> Result<RCurve> {
        if displacement.len() != force.len() {
            return Err(ModelError::LengthMismatch {
                displacement: displacement.len(),
                force: force.len(),
            });
        }
        let n = displacement.len();
        if n < 3 {
            return Err(ModelError::TooFewSamples(n));
        }

        let mut crack_length = Vec::with_capacity(n - 2);
        let mut fracture_resistance = Vec::with_capacity(n - 2);
        let mut previous = self.state.initial_crack;
        for (&u, &p) in displacement[1..n - 1].iter().zip(&force[1..n - 1]) {
            let crack = self.invert_compliance(u / p, previous);
            crack_length.push(crack);
            fracture_resistance.push(self.resistance(p, crack));
            previous = crack;
        }

        Ok(RCurve {
            crack_length,
            fracture_resistance,
        })
    }

    /// Set the specimen up from `record`, then use its `Displacement` and
    /// `Reaction Force` series.
    pub fn r_curve_from_record(&mut self, record: &Record) -> Result<RCurve> {
        self.setup_from_record(record)?;
        let displacement = series(record, DISPLACEMENT)?;
        let force = series(record, REACTION_FORCE)?;
        self.r_curve(&displacement, &force)
    }
}

fn closest_positive_root(polynomial: &Polynomial, target: f64) -> Option<f64> {
    polynomial
        .positive_real_roots()
        .into_iter()
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
}
