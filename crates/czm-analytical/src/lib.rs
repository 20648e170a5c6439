//! Closed-form fracture mechanics of standardised cohesive-zone test specimens.
//!
//! This crate provides:
//! - **Section helpers** for rectangular adherends
//! - **Specimen state** built from experiment records (`Length`, `Width`, `E`, ...)
//! - **Beam theories** of the End-Notch-Flexure, Asymmetric-Single-Leg-Bending
//!   and Asymmetric-Double-Cantilever-Beam tests
//! - **Reaction force** prediction for an imposed opening displacement
//! - **R-curve** reconstruction from a measured force-displacement history
//!
//! Models are plain values; independent specimens can be evaluated from as
//! many threads as needed.

pub mod error;
pub mod model;
pub mod polynomial;
pub mod record;
pub mod section;
pub mod specimen;
pub mod theory;

pub use error::{ModelError, Result};
pub use model::{RCurve, ReactionForce, Specimen};
pub use polynomial::Polynomial;
pub use record::{DISPLACEMENT, REACTION_FORCE, Record, SpecimenParameters};
pub use section::{flexural_rigidity, inertia};
pub use specimen::{MaterialKind, SpecimenState, Stiffness};
pub use theory::{Adcb, Aslb, BeamTheory, Coefficients, Enf, SpecimenKind};
