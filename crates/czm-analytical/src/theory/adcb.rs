//! Asymmetric double cantilever beam (mode I dominated).

use super::BeamTheory;
use crate::polynomial::Polynomial;
use crate::specimen::{SpecimenState, Stiffness};

/// ADCB coefficients.
///
/// `C(a) = C1·a³ + C2·a` and `G = P² (3 C1 a² + C2) / 2b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adcb {
    /// Bending term, `(1/Du + 1/Dl) / 3`.
    pub c1: f64,
    /// Shear term, `6 (1/hu + 1/hl) / (5 b G13)`.
    pub c2: f64,
    pub width: f64,
    pub fracture_toughness: f64,
}

impl BeamTheory for Adcb {
    fn derive(state: &SpecimenState, stiffness: &Stiffness) -> Self {
        let bending = 1.0 / stiffness.rigidity_upper + 1.0 / stiffness.rigidity_lower;
        let shear = 1.0 / state.thickness_upper + 1.0 / state.thickness_lower;
        Self {
            c1: bending / 3.0,
            c2: 6.0 * shear / (5.0 * state.width * stiffness.g13),
            width: state.width,
            fracture_toughness: state.fracture_toughness,
        }
    }

    fn compliance(&self, crack: f64) -> f64 {
        crack.powi(3) * self.c1 + crack * self.c2
    }

    fn resistance(&self, force: f64, crack: f64) -> f64 {
        force.powi(2) * (3.0 * self.c1 * crack.powi(2) + self.c2) / (2.0 * self.width)
    }

    fn compliance_polynomial(&self) -> Polynomial {
        Polynomial::new(vec![self.c1, 0.0, self.c2, 0.0])
    }

    fn growth_polynomial(&self, displacement: f64) -> Polynomial {
        let bg = self.width * self.fracture_toughness;
        let u2 = displacement.powi(2);
        Polynomial::new(vec![
            2.0 * bg * self.c1.powi(2),
            0.0,
            4.0 * bg * self.c1 * self.c2,
            0.0,
            2.0 * bg * self.c2.powi(2) - 3.0 * u2 * self.c1,
            0.0,
            -self.c2 * u2,
        ])
    }
}
