//! Python bindings.
//!
//! Every input is array-like: a float, an int, a list, or a numpy array of
//! any shape and numeric dtype, converted to float64. Zero-dimensional
//! inputs give back a float, anything else gives back an array evaluated
//! element by element. Functions taking two inputs broadcast them together
//! like numpy.

use crate::error::SpectralError;
use crate::spectral::{self, Elementwise, Gas, DEFAULT_RELATIVE_HUMIDITY, DEFAULT_TEMPERATURE};
use log::debug;
use ndarray::ArrayD;
use numpy::{AllowTypeChange, IntoPyArray, PyArrayLikeDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyFloat;

impl From<SpectralError> for PyErr {
    fn from(e: SpectralError) -> Self {
        match e {
            SpectralError::ThreadPool(_) => PyValueError::new_err(e.to_string()),
            SpectralError::UnknownGas(_) => PyValueError::new_err(e.to_string()),
            SpectralError::IncompatibleShapes(..) => PyValueError::new_err(e.to_string()),
        }
    }
}

/// Anything numpy can turn into a float64 array.
type ArrayLike<'py> = PyArrayLikeDyn<'py, f64, AllowTypeChange>;

/// Convert a result back to Python: a float for zero-dimensional results,
/// otherwise a numpy array.
fn to_python(py: Python<'_>, result: ArrayD<f64>) -> Bound<'_, PyAny> {
    if result.ndim() == 0 {
        if let Some(&x) = result.iter().next() {
            return PyFloat::new(py, x).into_any();
        }
    }
    result.into_pyarray(py).into_any()
}

/// Evaluate `f` on each element of `values`.
///
/// Arrays are evaluated on a worker pool with `num_threads` threads, with
/// the GIL released.
fn evaluate<'py, F>(
    py: Python<'py>,
    values: ArrayLike<'py>,
    num_threads: Option<usize>,
    f: F,
) -> PyResult<Bound<'py, PyAny>>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let view = values.as_array();
    if view.ndim() == 0 {
        return Ok(to_python(py, view.mapv(f)));
    }

    let elementwise = Elementwise::new(num_threads)?;
    debug!("evaluating array of shape {:?}", view.shape());

    let result = py.allow_threads(|| elementwise.map(view, f));
    Ok(to_python(py, result))
}

/// Evaluate `f` on each pair of elements of `left` and `right` broadcast
/// together.
fn evaluate_pair<'py, F>(
    py: Python<'py>,
    left: ArrayLike<'py>,
    right: ArrayLike<'py>,
    num_threads: Option<usize>,
    f: F,
) -> PyResult<Bound<'py, PyAny>>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    let (left, right) = (left.as_array(), right.as_array());
    let elementwise = Elementwise::new(num_threads)?;
    debug!(
        "evaluating arrays of shapes {:?} and {:?}",
        left.shape(),
        right.shape()
    );

    let result = py.allow_threads(|| elementwise.zip_map(left, right, f))?;
    Ok(to_python(py, result))
}

/// Planck function B(nu, T) for a wavenumber `nu_cm` in cm⁻¹ and a
/// temperature `T` in K (260 K when not given).
#[pyfunction]
#[pyo3(signature = (nu_cm, T = None, num_threads = None))]
#[allow(non_snake_case)]
fn planck_nu<'py>(
    py: Python<'py>,
    nu_cm: ArrayLike<'py>,
    T: Option<ArrayLike<'py>>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    match T {
        Some(t) => evaluate_pair(py, nu_cm, t, num_threads, spectral::planck_radiance),
        None => evaluate(py, nu_cm, num_threads, |nu| {
            spectral::planck_radiance(nu, DEFAULT_TEMPERATURE)
        }),
    }
}

/// Total water vapor mass (kg/m²) of a column with surface temperature `T`
/// in K and relative humidity `RH` (1 when not given).
#[pyfunction]
#[pyo3(signature = (T, RH = None, num_threads = None))]
#[allow(non_snake_case)]
fn column_mass_h2o<'py>(
    py: Python<'py>,
    T: ArrayLike<'py>,
    RH: Option<ArrayLike<'py>>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    match RH {
        Some(rh) => evaluate_pair(py, T, rh, num_threads, spectral::column_mass_h2o),
        None => evaluate(py, T, num_threads, |t| {
            spectral::column_mass_h2o(t, DEFAULT_RELATIVE_HUMIDITY)
        }),
    }
}

/// Total CO2 mass (kg/m²) of a column with mixing ratio `q_co2`.
#[pyfunction]
#[pyo3(signature = (q_co2, num_threads = None))]
fn column_mass_co2<'py>(
    py: Python<'py>,
    q_co2: ArrayLike<'py>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    evaluate(py, q_co2, num_threads, spectral::column_mass_co2)
}

/// Total ozone mass (kg/m²) of a column.
#[pyfunction]
fn column_mass_o3() -> f64 {
    spectral::column_mass_o3()
}

/// Water vapor mass absorption coefficient (m²/kg) at `nu` in cm⁻¹.
#[pyfunction]
#[pyo3(signature = (nu, num_threads = None))]
fn h2o_abs_coef_nu<'py>(
    py: Python<'py>,
    nu: ArrayLike<'py>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    evaluate(py, nu, num_threads, spectral::h2o_abs_coef)
}

/// CO2 mass absorption coefficient (m²/kg) at `nu` in cm⁻¹.
#[pyfunction]
#[pyo3(signature = (nu, num_threads = None))]
fn co2_abs_coef_nu<'py>(
    py: Python<'py>,
    nu: ArrayLike<'py>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    evaluate(py, nu, num_threads, spectral::co2_abs_coef)
}

/// Ozone mass absorption coefficient (m²/kg) at `nu` in cm⁻¹.
#[pyfunction]
#[pyo3(signature = (nu, num_threads = None))]
fn o3_abs_coef_nu<'py>(
    py: Python<'py>,
    nu: ArrayLike<'py>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    evaluate(py, nu, num_threads, spectral::o3_abs_coef)
}

/// Mass absorption coefficient (m²/kg) of the gas named `gas` ("h2o", "co2"
/// or "o3") at `nu` in cm⁻¹.
#[pyfunction]
#[pyo3(signature = (gas, nu, num_threads = None))]
fn abs_coef_nu<'py>(
    py: Python<'py>,
    gas: &str,
    nu: ArrayLike<'py>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    let gas: Gas = gas.parse()?;
    evaluate(py, nu, num_threads, move |nu| gas.absorption_coefficient(nu))
}

/// Validity band `(lower, upper)` in cm⁻¹ of the absorption fit for `gas`.
#[pyfunction]
fn abs_coef_band(gas: &str) -> PyResult<(f64, f64)> {
    let band = gas.parse::<Gas>()?.band();
    Ok((band.lower, band.upper))
}

/// Add every function to the module `m`.
fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(planck_nu, m)?)?;
    m.add_function(wrap_pyfunction!(column_mass_h2o, m)?)?;
    m.add_function(wrap_pyfunction!(column_mass_co2, m)?)?;
    m.add_function(wrap_pyfunction!(column_mass_o3, m)?)?;
    m.add_function(wrap_pyfunction!(h2o_abs_coef_nu, m)?)?;
    m.add_function(wrap_pyfunction!(co2_abs_coef_nu, m)?)?;
    m.add_function(wrap_pyfunction!(o3_abs_coef_nu, m)?)?;
    m.add_function(wrap_pyfunction!(abs_coef_nu, m)?)?;
    m.add_function(wrap_pyfunction!(abs_coef_band, m)?)?;
    Ok(())
}

/// A Python module implemented in Rust.
#[pymodule]
fn spectral_calc(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    register(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array2, ArrayD};
    use numpy::{PyArrayDyn, PyArrayMethods};
    use pyo3::types::PyList;

    /// Run `test` with a freshly registered module.
    fn with_module<F>(test: F)
    where
        F: for<'py> FnOnce(Python<'py>, &Bound<'py, PyModule>) -> PyResult<()>,
    {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let m = PyModule::new(py, "spectral_calc")?;
            register(&m)?;
            test(py, &m)
        })
        .unwrap();
    }

    fn to_array(result: &Bound<'_, PyAny>) -> PyResult<ArrayD<f64>> {
        Ok(result
            .downcast::<PyArrayDyn<f64>>()?
            .readonly()
            .as_array()
            .to_owned())
    }

    #[test]
    fn float_in_float_out() {
        with_module(|_py, m| {
            let b = m.getattr("planck_nu")?.call1((667.,))?;
            assert!(b.is_instance_of::<PyFloat>());
            assert_eq!(
                b.extract::<f64>()?,
                spectral::planck_radiance(667., DEFAULT_TEMPERATURE)
            );

            // Ints are numbers too
            let k = m.getattr("co2_abs_coef_nu")?.call1((667,))?;
            assert!(k.is_instance_of::<PyFloat>());
            assert_eq!(k.extract::<f64>()?, 240.);

            let o3 = m.getattr("column_mass_o3")?.call0()?;
            assert_eq!(o3.extract::<f64>()?, 6.5);
            Ok(())
        });
    }

    #[test]
    fn defaults() {
        with_module(|_py, m| {
            let planck = m.getattr("planck_nu")?;
            assert_eq!(
                planck.call1((667.,))?.extract::<f64>()?,
                planck.call1((667., 260.))?.extract::<f64>()?
            );

            let h2o = m.getattr("column_mass_h2o")?;
            assert_eq!(
                h2o.call1((290.,))?.extract::<f64>()?,
                spectral::column_mass_h2o(290., 1.)
            );
            assert_eq!(
                h2o.call1((290., 0.5))?.extract::<f64>()?,
                spectral::column_mass_h2o(290., 0.5)
            );
            Ok(())
        });
    }

    #[test]
    fn array_keeps_shape() {
        with_module(|py, m| {
            let nu = Array2::from_shape_fn((3, 4), |(i, j)| 100. * (i * 4 + j) as f64 + 50.);
            let k = m
                .getattr("h2o_abs_coef_nu")?
                .call1((nu.clone().into_pyarray(py),))?;
            let k = to_array(&k)?;
            assert_eq!(k.shape(), &[3, 4]);
            for (&nu, &k) in nu.iter().zip(k.iter()) {
                assert_eq!(k, spectral::h2o_abs_coef(nu));
            }
            Ok(())
        });
    }

    #[test]
    fn int_arrays_and_lists() {
        with_module(|py, m| {
            let nu = Array1::<i64>::from(vec![9, 150, 1500, 1501]).into_pyarray(py);
            let k = to_array(&m.getattr("h2o_abs_coef_nu")?.call1((nu,))?)?;
            assert_eq!(k, array![0., 130., 8., 0.].into_dyn());

            let nu = PyList::new(py, [499., 667., 851.])?;
            let k = to_array(&m.getattr("co2_abs_coef_nu")?.call1((nu,))?)?;
            assert_eq!(k, array![0., 240., 0.].into_dyn());

            let gas = PyList::new(py, [879, 1040, 1201])?;
            let k = to_array(&m.getattr("abs_coef_nu")?.call1(("o3", gas))?)?;
            assert_eq!(k, array![0., 45., 0.].into_dyn());
            Ok(())
        });
    }

    #[test]
    fn temperature_and_humidity_broadcast() {
        with_module(|py, m| {
            let nu = array![[500.], [667.], [1000.]].into_pyarray(py);
            let t = PyList::new(py, [220., 300.])?;
            let b = to_array(&m.getattr("planck_nu")?.call1((nu, t))?)?;
            assert_eq!(b.shape(), &[3, 2]);
            assert_eq!(b[[1, 0]], spectral::planck_radiance(667., 220.));
            assert_eq!(b[[2, 1]], spectral::planck_radiance(1000., 300.));

            let t = PyList::new(py, [280., 290., 300.])?;
            let rh = array![[0.5], [1.]].into_pyarray(py);
            let masses = to_array(&m.getattr("column_mass_h2o")?.call1((t, rh))?)?;
            assert_eq!(masses.shape(), &[2, 3]);
            assert_relative_eq!(masses[[0, 1]], 0.5 * masses[[1, 1]], max_relative = 1e-15);
            assert_eq!(masses[[1, 2]], spectral::column_mass_h2o(300., 1.));
            Ok(())
        });
    }

    #[test]
    fn value_errors() {
        with_module(|py, m| {
            let err = m
                .getattr("abs_coef_nu")?
                .call1(("ch4", 667.))
                .unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));

            let err = m.getattr("abs_coef_band")?.call1(("n2o",)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));

            let nu = PyList::new(py, [500., 600., 700.])?;
            let t = PyList::new(py, [250., 300.])?;
            let err = m.getattr("planck_nu")?.call1((nu, t)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            Ok(())
        });
    }

    #[test]
    fn bands() {
        with_module(|_py, m| {
            let band: (f64, f64) = m.getattr("abs_coef_band")?.call1(("CO2",))?.extract()?;
            assert_eq!(band, (500., 850.));
            Ok(())
        });
    }
}
