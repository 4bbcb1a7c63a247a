//! Closed-form spectral quantities for a single atmospheric column

mod absorption;
mod batch;
mod column_mass;
mod planck;


use crate::error::SpectralError;
use std::{fmt, str::FromStr};

pub use self::absorption::{co2_abs_coef, h2o_abs_coef, o3_abs_coef, ExpLobe};
pub use self::batch::Elementwise;
pub use self::column_mass::{column_mass_co2, column_mass_h2o, column_mass_o3};
pub use self::planck::planck_radiance;

/// Temperature in K used for the Planck function when the caller has no
/// better value.
pub const DEFAULT_TEMPERATURE: f64 = 260.;

/// Relative humidity used for the water vapor column when unspecified.
pub const DEFAULT_RELATIVE_HUMIDITY: f64 = 1.;

/// An inclusive wavenumber interval in cm⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Lowest valid wavenumber in cm⁻¹
    pub lower: f64,
    /// Highest valid wavenumber in cm⁻¹
    pub upper: f64,
}

impl Band {
    /// Create a band from its two (inclusive) edges.
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether `nu` lies inside the band, edges included. NaN never does.
    pub fn contains(&self, nu: f64) -> bool {
        self.lower <= nu && nu <= self.upper
    }
}

/// The absorbing gases with an empirical absorption spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gas {
    /// Water vapor
    H2o,
    /// Carbon dioxide
    Co2,
    /// Ozone
    O3,
}

impl Gas {
    /// Every supported gas.
    pub const ALL: [Gas; 3] = [Gas::H2o, Gas::Co2, Gas::O3];

    /// Wavenumber band where the absorption fit is valid.
    pub fn band(self) -> Band {
        match self {
            Gas::H2o => absorption::H2O_BAND,
            Gas::Co2 => absorption::CO2_BAND,
            Gas::O3 => absorption::O3_BAND,
        }
    }

    /// Mass absorption coefficient in m²/kg at wavenumber `nu` in cm⁻¹.
    pub fn absorption_coefficient(self, nu: f64) -> f64 {
        match self {
            Gas::H2o => h2o_abs_coef(nu),
            Gas::Co2 => co2_abs_coef(nu),
            Gas::O3 => o3_abs_coef(nu),
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formula = match self {
            Gas::H2o => "H2O",
            Gas::Co2 => "CO2",
            Gas::O3 => "O3",
        };
        f.write_str(formula)
    }
}

impl FromStr for Gas {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h2o" => Ok(Gas::H2o),
            "co2" => Ok(Gas::Co2),
            "o3" => Ok(Gas::O3),
            _ => Err(SpectralError::UnknownGas(s.to_string())),
        }
    }
}
