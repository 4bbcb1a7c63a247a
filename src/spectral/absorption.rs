//! Empirical mass absorption coefficients.
//!
//! Each spectrum is built from one or two exponential lobes and only holds
//! inside a band; outside it the coefficient is exactly zero. Reference:
//! Jeevanjee 2023.

use super::Band;

/// Water vapor: rotational band up to the edge of the vibration-rotation band
pub(super) const H2O_BAND: Band = Band::new(10., 1500.);
/// CO2: band centred near 667 cm⁻¹
pub(super) const CO2_BAND: Band = Band::new(500., 850.);
/// Ozone: band centred near 1040 cm⁻¹
pub(super) const O3_BAND: Band = Band::new(880., 1200.);

const H2O_ROTATIONAL: ExpLobe = ExpLobe::new(130., 150., 56.);
const H2O_VIBRATIONAL: ExpLobe = ExpLobe::new(8., 1500., 40.);
const CO2_LOBE: ExpLobe = ExpLobe::new(240., 667., 10.5);
const O3_LOBE: ExpLobe = ExpLobe::new(45., 1040., 10.5);

/// A symmetric exponential decay of the absorption coefficient away from a
/// band center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpLobe {
    /// Peak mass absorption coefficient in m²/kg
    pub amplitude: f64,
    /// Peak wavenumber in cm⁻¹
    pub center: f64,
    /// e-folding distance in cm⁻¹
    pub width: f64,
}

impl ExpLobe {
    /// Create a lobe with peak `amplitude` (m²/kg) at `center` (cm⁻¹) that
    /// e-folds over `width` (cm⁻¹).
    pub const fn new(amplitude: f64, center: f64, width: f64) -> Self {
        Self {
            amplitude,
            center,
            width,
        }
    }

    /// Evaluate the lobe at `nu` in cm⁻¹, ignoring any band limits.
    pub fn eval(&self, nu: f64) -> f64 {
        self.amplitude * f64::exp(-(nu - self.center).abs() / self.width)
    }
}

/// Water vapor mass absorption coefficient in m²/kg at `nu` in cm⁻¹.
///
/// Inside 10–1500 cm⁻¹ this is the larger of the rotational lobe at 150 cm⁻¹
/// and the vibration-rotation lobe at 1500 cm⁻¹, and zero elsewhere.
pub fn h2o_abs_coef(nu: f64) -> f64 {
    if H2O_BAND.contains(nu) {
        f64::max(H2O_ROTATIONAL.eval(nu), H2O_VIBRATIONAL.eval(nu))
    } else {
        0.
    }
}

/// CO2 mass absorption coefficient in m²/kg at `nu` in cm⁻¹, zero outside
/// 500–850 cm⁻¹.
pub fn co2_abs_coef(nu: f64) -> f64 {
    if CO2_BAND.contains(nu) {
        CO2_LOBE.eval(nu)
    } else {
        0.
    }
}

/// Ozone mass absorption coefficient in m²/kg at `nu` in cm⁻¹, zero outside
/// 880–1200 cm⁻¹.
pub fn o3_abs_coef(nu: f64) -> f64 {
    if O3_BAND.contains(nu) {
        O3_LOBE.eval(nu)
    } else {
        0.
    }
}
