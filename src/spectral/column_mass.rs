//! Column-integrated absorber masses.
//!
//! References: Jeevanjee 2023 and Stevens and Kluft 2023.

use crate::constants::PhysicalConstants;

/// Total water vapor mass of a column in kg/m².
///
/// For a surface temperature `t` in K and a relative humidity `rh`, compute the
/// column water vapor assuming a constant lapse rate. `rh` scales the result
/// linearly and isn't clamped to [0, 1].
pub fn column_mass_h2o(t: f64, rh: f64) -> f64 {
    /// Latent heat of vaporisation (J/kg)
    const L: f64 = 2.5e6;
    /// Specific gas constant of water vapor (J/kg/K)
    const R_H2O: f64 = 461.5;
    /// Environmental lapse rate (K/m)
    const LAPSE_RATE: f64 = 6.5e-3;
    /// Reference pressure term (Pa)
    const P_NU_REF: f64 = 2.5e11;

    // Typical values, the result is not very sensitive to them
    const TS: f64 = 290.;
    const TSTR: f64 = 210.;

    let m_ref = rh * P_NU_REF * (TS + TSTR) / (2. * LAPSE_RATE * L);

    m_ref * f64::exp(-L / (R_H2O * t))
}

/// Total CO2 mass of a column in kg/m².
///
/// `q` is a dimensionless mixing ratio. Whether it's a mass or a volume
/// fraction is up to the caller, it is only a multiplicative factor here.
pub fn column_mass_co2(q: f64) -> f64 {
    PhysicalConstants::SI.column_mass_co2(q)
}

/// Total ozone mass of a column in kg/m², held constant.
pub fn column_mass_o3() -> f64 {
    6.5
}

impl PhysicalConstants {
    /// Same as [`column_mass_co2`], using this gravitational acceleration.
    pub fn column_mass_co2(&self, q: f64) -> f64 {
        /// Surface pressure (Pa)
        const PS: f64 = 1e5;
        /// Reference pressure accounting for pressure broadening (Pa)
        const P_REF: f64 = 0.5e5;

        q * PS.powi(2) / (P_REF * self.gravity)
    }
}
