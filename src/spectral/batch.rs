//! Elementwise evaluation over arrays.

use super::{column_mass_co2, column_mass_h2o, planck_radiance, Gas};
use crate::error::SpectralError;
use log::debug;
use ndarray::{Array, ArrayD, ArrayView, ArrayViewD, Dimension, Zip};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Applies a scalar formula to every element of an array.
///
/// The elements are independent so they are spread over a dedicated worker
/// pool. The output always has the shape of the input, and each element is
/// bitwise identical to calling the scalar function on the matching input.
#[derive(Debug)]
pub struct Elementwise {
    pool: ThreadPool,
}

impl Elementwise {
    /// Build the worker pool.
    ///
    /// The number of worker threads is controlled by `num_threads`. It must
    /// be a positive integer, or `None` to automatically choose the number of
    /// threads.
    pub fn new(num_threads: Option<usize>) -> Result<Self, SpectralError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.unwrap_or(0))
            .build()?;
        debug!(
            "built elementwise pool with {} threads",
            pool.current_num_threads()
        );

        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Evaluate `f` on each element of `values`.
    pub fn map<D, F>(&self, values: ArrayView<'_, f64, D>, f: F) -> Array<f64, D>
    where
        D: Dimension,
        F: Fn(f64) -> f64 + Sync + Send,
    {
        debug!(
            "evaluating {} elements with shape {:?}",
            values.len(),
            values.shape()
        );
        self.pool
            .install(|| Zip::from(values).par_map_collect(|&x| f(x)))
    }

    /// Evaluate `f` on each pair of elements of `left` and `right`.
    ///
    /// The two arrays are broadcast together the way numpy does it: shapes
    /// are aligned on their last axis, and each axis must either match or be
    /// 1 in one of them.
    pub fn zip_map<F>(
        &self,
        left: ArrayViewD<'_, f64>,
        right: ArrayViewD<'_, f64>,
        f: F,
    ) -> Result<ArrayD<f64>, SpectralError>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        let incompatible =
            || SpectralError::IncompatibleShapes(left.shape().to_vec(), right.shape().to_vec());
        let shape = broadcast_shape(left.shape(), right.shape()).ok_or_else(incompatible)?;
        let left_b = left.broadcast(shape.clone()).ok_or_else(incompatible)?;
        let right_b = right.broadcast(shape).ok_or_else(incompatible)?;
        debug!(
            "evaluating {} element pairs with shape {:?}",
            left_b.len(),
            left_b.shape()
        );

        Ok(self.pool.install(|| {
            Zip::from(left_b)
                .and(right_b)
                .par_map_collect(|&x, &y| f(x, y))
        }))
    }

    /// Planck radiance for each wavenumber in `nu` (cm⁻¹) at temperature `t`
    /// (K).
    pub fn planck_radiance<D: Dimension>(
        &self,
        nu: ArrayView<'_, f64, D>,
        t: f64,
    ) -> Array<f64, D> {
        self.map(nu, |nu| planck_radiance(nu, t))
    }

    /// Column water vapor for each surface temperature in `t` (K) at relative
    /// humidity `rh`.
    pub fn column_mass_h2o<D: Dimension>(
        &self,
        t: ArrayView<'_, f64, D>,
        rh: f64,
    ) -> Array<f64, D> {
        self.map(t, |t| column_mass_h2o(t, rh))
    }

    /// Column CO2 for each mixing ratio in `q`.
    pub fn column_mass_co2<D: Dimension>(&self, q: ArrayView<'_, f64, D>) -> Array<f64, D> {
        self.map(q, column_mass_co2)
    }

    /// Mass absorption coefficient of `gas` for each wavenumber in `nu`
    /// (cm⁻¹).
    pub fn absorption_coefficient<D: Dimension>(
        &self,
        gas: Gas,
        nu: ArrayView<'_, f64, D>,
    ) -> Array<f64, D> {
        self.map(nu, |nu| gas.absorption_coefficient(nu))
    }
}

/// Common shape of two broadcast arrays, if there is one.
fn broadcast_shape(left: &[usize], right: &[usize]) -> Option<Vec<usize>> {
    let ndim = left.len().max(right.len());
    // Missing leading axes count as length 1
    let axis = |shape: &[usize], i: usize| {
        let offset = ndim - shape.len();
        if i < offset {
            1
        } else {
            shape[i - offset]
        }
    };

    (0..ndim)
        .map(|i| match (axis(left, i), axis(right, i)) {
            (l, r) if l == r => Some(l),
            (1, r) => Some(r),
            (l, 1) => Some(l),
            _ => None,
        })
        .collect()
}
