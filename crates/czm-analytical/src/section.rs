//! Rectangular adherend cross-sections.
//!
//! Every specimen arm is a rectangle of width `b` (out of plane) and height `h`
//! (through thickness), bent about the out-of-plane axis through its centroid.

/// Second moment of area of a rectangular cross-section, `b·h³/12`.
///
/// Dimensions are not validated; non-positive input gives a meaningless
/// (but finite) result.
///
/// # Example
/// ```
/// use czm_analytical::section::inertia;
///
/// assert_eq!(inertia(12.0, 1.0), 1.0);
/// ```
pub fn inertia(width: f64, height: f64) -> f64 {
    width * height.powi(3) / 12.0
}

/// Bending stiffness `E·I` of a rectangular arm.
pub fn flexural_rigidity(modulus: f64, width: f64, height: f64) -> f64 {
    modulus * inertia(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inertia_scales_with_cube_of_height() {
        let thin = inertia(25.0, 2.4);
        let thick = inertia(25.0, 4.8);
        assert!((thick / thin - 8.0).abs() < 1e-12);
        assert!((thin - 28.8).abs() < 1e-9);
    }

    #[test]
    fn rigidity_is_modulus_times_inertia() {
        let d = flexural_rigidity(109_000.0, 25.0, 2.4);
        assert!((d - 109_000.0 * 28.8).abs() < 1e-6);
    }
}
