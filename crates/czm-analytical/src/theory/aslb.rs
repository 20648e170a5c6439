//! Asymmetric single-leg bending (mixed mode I/II).
//!
//! The uncracked region is treated as a single beam of rigidity `Dm` about the
//! combined neutral axis; `du` and `dl` are the distances from that axis to the
//! mid-planes of the upper and lower arms. `C1` collects the shear-correction
//! integral over the asymmetric section.

use super::BeamTheory;
use crate::polynomial::Polynomial;
use crate::specimen::{SpecimenState, Stiffness};

/// ASLB coefficients.
///
/// `C(a) = P1·a³/12 + P3·a + P5` and `G = P² (P2·a²/4 + P4) / 2b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aslb {
    pub du: f64,
    pub dl: f64,
    pub dm: f64,
    pub c1: f64,
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub p5: f64,
    pub width: f64,
    pub fracture_toughness: f64,
}

impl BeamTheory for Aslb {
    fn derive(state: &SpecimenState, stiffness: &Stiffness) -> Self {
        let e1 = stiffness.e1;
        let g13 = stiffness.g13;
        let b = state.width;
        let hu = state.thickness_upper;
        let hl = state.thickness_lower;
        let l = state.half_length;

        let du = hl / 2.0;
        let dl = (hu + hl) / 2.0 - du;
        let dm = e1 * b * ((hu.powi(3) + hl.powi(3)) / 12.0 + hu * du.powi(2) + hl * dl.powi(2));

        let plus = dl + hl / 2.0;
        let minus = hu / 2.0 - dl;
        let mut c1 = hl * plus.powi(4) - 7.0 * plus.powi(5) / 15.0;
        c1 += minus.powi(3) * (minus.powi(2) / 5.0 - 2.0 * plus.powi(2) / 3.0);
        c1 += 8.0 * (plus.powi(5) - minus.powi(5)) / 15.0;
        c1 -= 8.0 * hl * dl * minus.powi(3) / 3.0;
        c1 -= 4.0 * hl.powi(2) * dl.powi(2) * minus;
        let c1 = c1 * e1.powi(2) / g13;

        let shear = 3.0 / (10.0 * b * hu * g13);
        let coupling = b * c1 / (16.0 * dm.powi(2));
        Self {
            du,
            dl,
            dm,
            c1,
            p1: 1.0 / stiffness.rigidity_upper - 1.0 / dm,
            p2: 1.0 / stiffness.rigidity_upper + 1.0 / dm,
            p3: shear - coupling,
            p4: shear + coupling,
            p5: l.powi(3) / (6.0 * dm) + l * b * c1 / (8.0 * dm.powi(2)),
            width: b,
            fracture_toughness: state.fracture_toughness,
        }
    }

    fn compliance(&self, crack: f64) -> f64 {
        self.p1 * crack.powi(3) / 12.0 + self.p3 * crack + self.p5
    }

    fn resistance(&self, force: f64, crack: f64) -> f64 {
        force.powi(2) * (0.25 * self.p2 * crack.powi(2) + self.p4) / (2.0 * self.width)
    }

    fn compliance_polynomial(&self) -> Polynomial {
        Polynomial::new(vec![self.p1 / 12.0, 0.0, self.p3, self.p5])
    }

    fn growth_polynomial(&self, displacement: f64) -> Polynomial {
        let bg = self.width * self.fracture_toughness;
        let u2 = displacement.powi(2);
        Polynomial::new(vec![
            2.0 * bg * (self.p1 / 12.0).powi(2),
            0.0,
            bg * self.p1 * self.p3 / 3.0,
            bg * self.p1 * self.p5 / 3.0,
            2.0 * bg * self.p3.powi(2) - 0.25 * self.p2 * u2,
            4.0 * bg * self.p3 * self.p5,
            2.0 * bg * self.p5.powi(2) - self.p4 * u2,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_aslb() -> Aslb {
        let state = SpecimenState::default();
        let stiffness = Stiffness::derive(&state).expect("defaults are valid");
        Aslb::derive(&state, &stiffness)
    }

    #[test]
    fn symmetric_arms_put_neutral_axis_at_interface() {
        let aslb = default_aslb();
        assert_relative_eq!(aslb.du, 1.2);
        assert_relative_eq!(aslb.dl, 1.2);
        assert_relative_eq!(aslb.dm, 2.51136e7, max_relative = 1e-12);
        assert_relative_eq!(aslb.c1, 315_346_452.48, max_relative = 1e-10);
        assert_relative_eq!(aslb.p3, 7.8125e-7, max_relative = 1e-10);
        assert_relative_eq!(aslb.p4, 2.34375e-6, max_relative = 1e-10);
    }

    #[test]
    fn compliance_at_initial_crack() {
        let aslb = default_aslb();
        assert_relative_eq!(aslb.compliance(60.0), 5.971765630309209e-3, max_relative = 1e-10);
    }

    #[test]
    fn growth_root_for_large_opening() {
        let aslb = default_aslb();
        let roots = aslb.growth_polynomial(5.0).positive_real_roots();
        let a = roots.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(a, 117.07312811785532, max_relative = 1e-8);
    }
}
