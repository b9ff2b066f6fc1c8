#![deny(unsafe_code)]
//! Hatching renderers.
//!
//! Both renderers walk straight pixel paths (rows and columns, or 45° and
//! 135° diagonals) and emit one segment per maximal run of pixels whose
//! darkness meets the threshold. Run detection is shared in [`run`].

pub mod diagonal;
pub mod orthogonal;
mod run;

pub use diagonal::{DiagonalHatch, DiagonalOptions};
pub use orthogonal::{OrthogonalHatch, OrthogonalOptions};
