//! Spectral quantities for a single atmospheric column
//!
//! Closed-form formulas for the Planck radiance, the column masses of water
//! vapor, CO2 and ozone, and empirical mass absorption coefficients of those
//! gases, meant to be combined by a caller into optical depths and fluxes.
//!
//! NOTE: the `python` module is the interface between Rust and Python and is
//! only built with the `python` feature. The real work happens in the other
//! modules, and they do not use `pyo3`.

pub mod constants;
pub mod error;
pub mod spectral;

#[cfg(feature = "python")]
mod python;

pub use constants::PhysicalConstants;
pub use error::SpectralError;
pub use spectral::{
    co2_abs_coef, column_mass_co2, column_mass_h2o, column_mass_o3, h2o_abs_coef, o3_abs_coef,
    planck_radiance, Band, Elementwise, ExpLobe, Gas, DEFAULT_RELATIVE_HUMIDITY,
    DEFAULT_TEMPERATURE,
};
