//! Probe-pulse envelopes for an EIT CNOT gate pulse sequence.
//!
//! The probe Rabi frequency follows a raised-cosine profile
//! ```text
//! Ω_p(t) = Ω_max (1 - cos(2π t / τ)) / 2
//! ```
//! which rises smoothly from zero, peaks at `t = τ/2`, and returns to zero at
//! `t = τ`. See [`envelope::envelope`].

pub mod error;
pub mod envelope;
pub mod config;
pub mod utils;

pub use ndarray_npy;
pub use error::{ PulseError, PulseResult };
pub use envelope::{ envelope, try_envelope, PulseTime, RaisedCosine };
