//! Physical constants shared by the formula evaluators.

/// The set of physical constants the evaluators depend on.
///
/// This is an immutable value: the free functions in [`crate::spectral`] use
/// [`PhysicalConstants::SI`], and the methods on this type (see
/// `spectral::planck` and `spectral::column_mass`) evaluate the same formulas
/// with whatever constants the caller injects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Planck constant in J s
    pub planck: f64,
    /// Speed of light in m/s
    pub speed_of_light: f64,
    /// Boltzmann constant in J/K
    pub boltzmann: f64,
    /// Gravitational acceleration in m/s²
    pub gravity: f64,
}

impl PhysicalConstants {
    /// Standard SI values (exact CODATA 2018 for h, c, k) with g = 9.81 m/s².
    pub const SI: Self = Self {
        planck: 6.626_070_15e-34,
        speed_of_light: 299_792_458.0,
        boltzmann: 1.380_649e-23,
        gravity: 9.81,
    };
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::SI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_si() {
        assert_eq!(PhysicalConstants::default(), PhysicalConstants::SI);
    }

    /// The second radiation constant h c / k is about 1.4388e-2 m K.
    #[test]
    fn second_radiation_constant() {
        let PhysicalConstants {
            planck,
            speed_of_light,
            boltzmann,
            ..
        } = PhysicalConstants::SI;
        assert_relative_eq!(
            planck * speed_of_light / boltzmann,
            1.438_776_877e-2,
            max_relative = 1e-9
        );
    }
}
