//! Error types.

/// Possible errors outside of the formula evaluators themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpectralError {
    /// The worker thread pool couldn't be built
    ThreadPool(String),
    /// The gas name isn't one of the supported absorbers
    UnknownGas(String),
    /// Two input arrays can't be broadcast to a common shape
    IncompatibleShapes(Vec<usize>, Vec<usize>),
}

impl std::fmt::Display for SpectralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralError::ThreadPool(reason) => {
                write!(f, "couldn't build the worker thread pool: {reason}")
            }
            SpectralError::UnknownGas(name) => {
                write!(f, "unknown gas \"{name}\", expected one of h2o, co2, o3")
            }
            SpectralError::IncompatibleShapes(left, right) => {
                write!(f, "shapes {left:?} and {right:?} can't be broadcast together")
            }
        }
    }
}

impl std::error::Error for SpectralError {}

impl From<rayon::ThreadPoolBuildError> for SpectralError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SpectralError::ThreadPool(e.to_string())
    }
}
