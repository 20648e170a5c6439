//! Real polynomials and their roots.
//!
//! Coefficients are stored highest degree first, so `[1, 0, -4]` is `x² - 4`.
//! Roots come from the eigenvalues of the companion matrix:
//!
//! ```text
//!     | -c1/c0  -c2/c0  ...  -cn/c0 |
//! C = |   1       0     ...    0    |
//!     |   0       1     ...    0    |
//!     |   0       0     ...1   0    |
//! ```
//!
//! The crack-growth polynomials of the specimen models have coefficients that
//! span twenty orders of magnitude, so the variable is rescaled by the
//! geometric mean root magnitude `|cn/c0|^(1/n)` before the companion matrix is
//! built, and every root that lands on the real axis is polished with a few
//! Newton steps on the unscaled polynomial.

use nalgebra::{Complex, DMatrix};
use nalgebra::linalg::Schur;

/// Imaginary parts below this (in rescaled coordinates) are treated as zero.
const IMAGINARY_TOLERANCE: f64 = 1e-6;
/// Relative residual a polished real root must reach to be accepted.
const RESIDUAL_TOLERANCE: f64 = 1e-8;
const NEWTON_STEPS: usize = 4;
const SCHUR_MAX_ITERATIONS: usize = 10_000;

/// Polynomial with real coefficients, highest degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered highest degree first.
    ///
    /// # Example
    /// ```
    /// use czm_analytical::polynomial::Polynomial;
    ///
    /// let p = Polynomial::new(vec![1.0, 0.0, -4.0]);
    /// assert_eq!(p.evaluate(2.0), 0.0);
    /// assert_eq!(p.positive_real_roots().len(), 1);
    /// ```
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree after leading zero coefficients are discarded.
    pub fn degree(&self) -> usize {
        self.trimmed().len().saturating_sub(1)
    }

    /// Evaluate with Horner's scheme.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn derivative(&self) -> Polynomial {
        let n = self.coefficients.len();
        if n <= 1 {
            return Polynomial::new(vec![0.0]);
        }
        let coefficients = self.coefficients[..n - 1]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * (n - 1 - i) as f64)
            .collect();
        Polynomial::new(coefficients)
    }

    /// The polynomial `p(x) - value`, i.e. with the constant term lowered.
    ///
    /// Solving `shifted(c)` for zero inverts `p(x) = c`.
    pub fn shifted(&self, value: f64) -> Polynomial {
        let mut coefficients = self.coefficients.clone();
        match coefficients.last_mut() {
            Some(constant) => *constant -= value,
            None => coefficients.push(-value),
        }
        Polynomial::new(coefficients)
    }

    /// All complex roots, in the order the eigenvalue solver produces them.
    ///
    /// Roots recognised as real carry an imaginary part of exactly zero.
    pub fn roots(&self) -> Vec<Complex<f64>> {
        let leading = self.trimmed();
        let trailing_zeros = leading.iter().rev().take_while(|&&c| c == 0.0).count();
        if trailing_zeros == leading.len() {
            return Vec::new();
        }
        let core = &leading[..leading.len() - trailing_zeros];
        let mut roots = Self::core_roots(core);
        roots.extend(std::iter::repeat_n(Complex::new(0.0, 0.0), trailing_zeros));
        roots
    }

    /// Positive real roots in solver order.
    pub fn positive_real_roots(&self) -> Vec<f64> {
        self.roots()
            .into_iter()
            .filter(|root| root.im == 0.0 && root.re > 0.0)
            .map(|root| root.re)
            .collect()
    }

    fn trimmed(&self) -> &[f64] {
        let first = self
            .coefficients
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(self.coefficients.len());
        &self.coefficients[first..]
    }

    /// Roots of a polynomial with non-zero leading and constant terms.
    fn core_roots(core: &[f64]) -> Vec<Complex<f64>> {
        let n = core.len() - 1;
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![Complex::new(-core[1] / core[0], 0.0)];
        }

        let mut scale = (core[n] / core[0]).abs().powf(1.0 / n as f64);
        if !scale.is_finite() || scale == 0.0 {
            scale = 1.0;
        }

        let mut companion = DMatrix::<f64>::zeros(n, n);
        let mut power = 1.0;
        for i in 1..=n {
            power *= scale;
            companion[(0, i - 1)] = -core[i] / (core[0] * power);
        }
        for i in 1..n {
            companion[(i, i - 1)] = 1.0;
        }

        let Some(schur) = Schur::try_new(companion, f64::EPSILON, SCHUR_MAX_ITERATIONS) else {
            log::warn!("companion matrix of degree {n} did not converge; no roots returned");
            return Vec::new();
        };

        let original = Polynomial::new(core.to_vec());
        schur
            .complex_eigenvalues()
            .iter()
            .map(|&y| {
                let root = y * scale;
                if y.im.abs() <= IMAGINARY_TOLERANCE * y.norm().max(1.0)
                    && let Some(x) = original.polish(root.re)
                {
                    return Complex::new(x, 0.0);
                }
                root
            })
            .collect()
    }

    /// Newton-polish a candidate real root; `None` if it is not a real root.
    fn polish(&self, mut x: f64) -> Option<f64> {
        let derivative = self.derivative();
        let mut residual = self.evaluate(x).abs();
        for _ in 0..NEWTON_STEPS {
            let slope = derivative.evaluate(x);
            if slope == 0.0 || residual == 0.0 {
                break;
            }
            let candidate = x - self.evaluate(x) / slope;
            let candidate_residual = self.evaluate(candidate).abs();
            if !candidate.is_finite() || candidate_residual >= residual {
                break;
            }
            x = candidate;
            residual = candidate_residual;
        }

        if residual <= RESIDUAL_TOLERANCE * self.magnitude_at(x) {
            Some(x)
        } else {
            None
        }
    }

    /// Sum of the absolute terms at `x`, the natural scale for the residual.
    fn magnitude_at(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(0.0, |acc, &c| acc * x.abs() + c.abs())
    }
}
