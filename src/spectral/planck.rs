//! Planck spectral radiance.

use crate::constants::PhysicalConstants;

/// Planck function in terms of wavenumber.
///
/// For a wavenumber `nu` in cm⁻¹ and a temperature `t` in K, compute π times
/// the spectral radiance per m⁻¹.
///
/// There is no guard on `t`: a zero or negative temperature gives the IEEE
/// special values the arithmetic produces.
pub fn planck_radiance(nu: f64, t: f64) -> f64 {
    PhysicalConstants::SI.planck_radiance(nu, t)
}

impl PhysicalConstants {
    /// Same as [`planck_radiance`], with these constants.
    pub fn planck_radiance(&self, nu: f64, t: f64) -> f64 {
        use std::f64::consts::PI;

        let Self {
            planck: h,
            speed_of_light: c,
            boltzmann: k,
            ..
        } = *self;

        // Convert from cm^-1 to m^-1
        let nu_m = nu * 100.;

        PI * (2. * h * c.powi(2) * nu_m.powi(3)) / (f64::exp(h * c * nu_m / (k * t)) - 1.)
    }
}
