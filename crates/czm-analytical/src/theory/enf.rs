//! End-notch flexure (mode II, three-point bending of a symmetric beam).

use super::BeamTheory;
use crate::polynomial::Polynomial;
use crate::specimen::{SpecimenState, Stiffness};

/// ENF coefficients.
///
/// `C(a) = P1·a³ + P2` and `G = 9 P² a² / P3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enf {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub fracture_toughness: f64,
}

impl BeamTheory for Enf {
    fn derive(state: &SpecimenState, stiffness: &Stiffness) -> Self {
        let e1 = stiffness.e1;
        let b = state.width;
        let h = state.thickness_upper;
        let l = state.half_length;

        let bending = 8.0 * e1 * b * h.powi(3);
        Self {
            p1: 3.0 / bending,
            p2: 2.0 * l.powi(3) / bending + 3.0 * l / (10.0 * b * h * stiffness.g13),
            p3: 16.0 * b.powi(2) * h.powi(3) * e1,
            fracture_toughness: state.fracture_toughness,
        }
    }

    fn compliance(&self, crack: f64) -> f64 {
        self.p1 * crack.powi(3) + self.p2
    }

    fn resistance(&self, force: f64, crack: f64) -> f64 {
        9.0 * force.powi(2) * crack.powi(2) / self.p3
    }

    fn compliance_polynomial(&self) -> Polynomial {
        Polynomial::new(vec![self.p1, 0.0, 0.0, self.p2])
    }

    fn growth_polynomial(&self, displacement: f64) -> Polynomial {
        let g = self.fracture_toughness;
        Polynomial::new(vec![
            g * self.p1.powi(2),
            0.0,
            0.0,
            2.0 * g * self.p1 * self.p2,
            -9.0 * displacement.powi(2) / self.p3,
            0.0,
            g * self.p2.powi(2),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_enf() -> Enf {
        let state = SpecimenState::default();
        let stiffness = Stiffness::derive(&state).expect("defaults are valid");
        Enf::derive(&state, &stiffness)
    }

    #[test]
    fn coefficients_for_default_specimen() {
        let enf = default_enf();
        assert_relative_eq!(enf.p1, 9.954765545361877e-9, max_relative = 1e-12);
        assert_relative_eq!(enf.p2, 9.076887954468231e-4, max_relative = 1e-12);
        assert_relative_eq!(enf.p3, 1.506816e10, max_relative = 1e-12);
        assert_relative_eq!(enf.compliance(60.0), 3.0579181532449885e-3, max_relative = 1e-12);
    }

    #[test]
    fn growth_polynomial_balances_toughness() {
        let enf = default_enf();
        let u = 3.0;
        let roots = enf.growth_polynomial(u).positive_real_roots();
        let a = roots.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(a, 102.3411567342185, max_relative = 1e-8);
        let force = u / enf.compliance(a);
        assert_relative_eq!(enf.resistance(force, a), enf.fracture_toughness, max_relative = 1e-8);
    }
}
