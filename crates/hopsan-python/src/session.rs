//! PyHopsan: Python wrapper around one engine session.
//!
//! Method names follow the engine's entry points (`loadModel`,
//! `getTimeVector`, ...). Result vectors are returned as freshly allocated
//! NumPy float64 arrays owned by Python.
//!
//! Every engine call runs with the GIL released. The engine itself is not
//! reentrant; the class is `unsendable` and each call holds `&mut self`.

use std::path::PathBuf;

use numpy::PyArray1;
use pyo3::prelude::*;

use hopsan::EngineConfig;

use crate::error::to_py_err;

/// A session with the native Hopsan engine.
///
/// Loads the engine from `install_root`, or from the directory named by the
/// `HOPSANHOME` environment variable when omitted, and loads the default
/// component library into it. The object is bound to the thread that
/// created it.
#[pyclass(name = "Hopsan", unsendable)]
pub(crate) struct Hopsan {
    session: hopsan::Hopsan,
}

#[pymethods]
impl Hopsan {
    #[new]
    #[pyo3(signature = (install_root=None))]
    fn new(py: Python<'_>, install_root: Option<PathBuf>) -> PyResult<Self> {
        let config = match install_root {
            Some(root) => EngineConfig::from_install_root(root),
            None => EngineConfig::from_env().map_err(to_py_err)?,
        };
        let session = py
            .detach(|| hopsan::Hopsan::with_config(&config))
            .map_err(to_py_err)?;
        Ok(Hopsan { session })
    }

    /// Load an additional component library.
    #[pyo3(name = "loadLibrary")]
    fn load_library(&mut self, py: Python<'_>, path: PathBuf) -> PyResult<()> {
        let session = &mut self.session;
        py.detach(move || session.load_component_library(path))
            .map_err(to_py_err)
    }

    /// Load a model file.
    #[pyo3(name = "loadModel")]
    fn load_model(&mut self, py: Python<'_>, path: PathBuf) -> PyResult<()> {
        let session = &mut self.session;
        py.detach(move || session.load_model(path)).map_err(to_py_err)
    }

    /// Run the loaded model to completion. Blocks until the run finishes.
    fn simulate(&mut self, py: Python<'_>) {
        // Release GIL: a run can take as long as the model says.
        let session = &mut self.session;
        py.detach(move || session.simulate());
    }

    /// Number of samples per result vector.
    #[pyo3(name = "getLogSamples")]
    fn get_log_samples(&mut self, py: Python<'_>) -> PyResult<usize> {
        let session = &mut self.session;
        py.detach(move || session.log_samples()).map_err(to_py_err)
    }

    /// The logged time points as a float64 array.
    #[pyo3(name = "getTimeVector")]
    fn get_time_vector<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let session = &mut self.session;
        let values = py.detach(move || session.time_vector()).map_err(to_py_err)?;
        Ok(PyArray1::from_vec(py, values))
    }

    /// The logged values of one channel, e.g. ``"Volume.P1.p"``.
    #[pyo3(name = "getDataVector")]
    fn get_data_vector<'py>(
        &mut self,
        py: Python<'py>,
        name: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let session = &mut self.session;
        let values = py
            .detach(move || session.data_vector(name))
            .map_err(to_py_err)?;
        Ok(PyArray1::from_vec(py, values))
    }

    /// Set a component parameter. The value is passed to the engine as text.
    #[pyo3(name = "setParameter")]
    fn set_parameter(&mut self, py: Python<'_>, name: &str, value: &str) -> PyResult<()> {
        let session = &mut self.session;
        py.detach(move || session.set_parameter(name, value))
            .map_err(to_py_err)
    }

    /// Set the simulation start time.
    #[pyo3(name = "setStartTime")]
    fn set_start_time(&mut self, py: Python<'_>, value: f64) {
        let session = &mut self.session;
        py.detach(move || session.set_start_time(value));
    }

    /// Set the solver time step.
    #[pyo3(name = "setTimeStep")]
    fn set_time_step(&mut self, py: Python<'_>, value: f64) {
        let session = &mut self.session;
        py.detach(move || session.set_time_step(value));
    }

    /// Set the simulation stop time.
    #[pyo3(name = "setStopTime")]
    fn set_stop_time(&mut self, py: Python<'_>, value: f64) {
        let session = &mut self.session;
        py.detach(move || session.set_stop_time(value));
    }

    /// Set the number of logged samples per result vector.
    #[pyo3(name = "setLogSamples")]
    fn set_log_samples(&mut self, py: Python<'_>, value: i32) {
        let session = &mut self.session;
        py.detach(move || session.set_log_samples(value));
    }

    fn __repr__(&self) -> String {
        match self.session.log_samples() {
            Ok(samples) => format!("Hopsan(log_samples={samples})"),
            Err(_) => "Hopsan(log_samples=?)".to_string(),
        }
    }
}
