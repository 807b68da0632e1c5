use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::TransportConfig;
use crate::core::{TransportEngine, DIM};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_count(electron_count: i64) -> PyResult<usize> {
    usize::try_from(electron_count).map_err(|_| py_err("electron_count must be >= 0"))
}

fn to_array(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around the Rust TransportEngine.
///
/// API:
/// - __new__(width, height, ion_spacing, initial_speed, electron_count, seed=None)
/// - step(acceleration, suppression)
/// - reset(width, height, ion_spacing, initial_speed, electron_count, seed=None)
/// - get_ions() / get_electrons() / get_velocities() -> np.ndarray, shape (N, 2)
/// - left_count, right_count, mean_collision_interval, ticks
#[pyclass]
pub struct DrudeSim {
    engine: TransportEngine,
}

#[pymethods]
impl DrudeSim {
    /// Build a new engine.
    ///
    /// Errors: raises ValueError on invalid parameters (non-positive spacing,
    /// negative speed, negative electron count).
    #[new]
    #[pyo3(signature = (width, height, ion_spacing, initial_speed, electron_count, seed=None))]
    fn new(
        width: f64,
        height: f64,
        ion_spacing: f64,
        initial_speed: f64,
        electron_count: i64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let n = to_count(electron_count)?;
        let engine = TransportEngine::new(width, height, ion_spacing, initial_speed, n, seed)
            .map_err(py_err)?;
        Ok(Self { engine })
    }

    /// Replace the engine wholesale; on error the current state is kept.
    #[pyo3(signature = (width, height, ion_spacing, initial_speed, electron_count, seed=None))]
    fn reset(
        &mut self,
        width: f64,
        height: f64,
        ion_spacing: f64,
        initial_speed: f64,
        electron_count: i64,
        seed: Option<u64>,
    ) -> PyResult<()> {
        let n = to_count(electron_count)?;
        let mut config = TransportConfig::new(width, height, ion_spacing, initial_speed, n);
        config.seed = seed;
        self.engine.reset(&config).map_err(py_err)
    }

    /// Advance one tick (releases the GIL during computation).
    fn step(&mut self, py: Python<'_>, acceleration: f64, suppression: f64) {
        py.detach(|| self.engine.step(acceleration, suppression));
    }

    /// Ion positions as a NumPy array of shape (M, 2), dtype=float64.
    fn get_ions(&self, py: Python<'_>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = to_array(&self.engine.ion_positions());
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Electron positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_electrons(&self, py: Python<'_>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = to_array(&self.engine.electron_positions());
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Electron velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> PyResult<Py<PyArray2<f64>>> {
        let velocities: Vec<[f64; DIM]> =
            self.engine.electrons().iter().map(|e| e.velocity).collect();
        Ok(to_array(&velocities).into_pyarray(py).to_owned().into())
    }

    #[getter]
    fn left_count(&self) -> u64 {
        self.engine.left_count()
    }

    #[getter]
    fn right_count(&self) -> u64 {
        self.engine.right_count()
    }

    #[getter]
    fn ticks(&self) -> u64 {
        self.engine.ticks()
    }

    /// Mean ticks between collisions (0.0 before the first collision).
    fn mean_collision_interval(&self) -> f64 {
        self.engine.mean_collision_interval()
    }
}

/// The drudesim Python module entry point.
#[pymodule]
fn drudesim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<DrudeSim>()?;
    Ok(())
}
