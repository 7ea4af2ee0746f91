//! The engine session: one loaded engine library behind safe methods.
//!
//! Each method encodes its arguments, forwards them to one entry point and,
//! for the vector getters, copies the result into a freshly allocated
//! `Vec<f64>`. Nothing is validated or cached on this side; the engine owns
//! all simulation state.

use std::cell::Cell;
use std::ffi::CString;
use std::marker::PhantomData;
use std::path::Path;

use libloading::Library;
use tracing::{debug, trace};

use crate::api::EngineApi;
use crate::config::EngineConfig;
use crate::error::{HopsanError, Result};
use crate::settings::SimulationSettings;

/// Initial value of result slots the engine is expected to overwrite.
const UNFILLED_SAMPLE: f64 = 1.0;

/// A session with the native Hopsan engine.
///
/// Owns the engine library handle and its resolved entry points. The engine
/// keeps one global model per loaded library; constructing several sessions
/// against the same installation shares that model.
///
/// The type is `Send` but `!Sync`: a session may move to, or be borrowed
/// mutably by, another thread, but engine calls are never issued
/// concurrently through one session.
#[derive(Debug)]
pub struct Hopsan {
    api: EngineApi,
    // Keeps the entry points in `api` mapped.
    _library: Option<Library>,
    _not_sync: PhantomData<Cell<()>>,
}

impl Hopsan {
    /// Load the engine from the installation named by `HOPSANHOME`, then
    /// load the default component library into it.
    pub fn new() -> Result<Self> {
        Self::with_config(&EngineConfig::from_env()?)
    }

    /// Load the engine and default component library named by `config`.
    #[allow(unsafe_code)]
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        let path = config.engine_library();
        debug!(path = %path.display(), "loading Hopsan engine library");
        // SAFETY: loading runs the library's initialisers. The configured
        // installation is trusted to hold a Hopsan engine build.
        let library = unsafe { Library::new(path) }.map_err(|source| HopsanError::LibraryLoad {
            path: path.to_path_buf(),
            source,
        })?;
        // SAFETY: a Hopsan engine exports the entry points with the
        // signatures declared in `api`.
        let api = unsafe { EngineApi::resolve(&library) }?;
        let mut session = Self {
            api,
            _library: Some(library),
            _not_sync: PhantomData,
        };
        session.load_component_library(config.default_component_library())?;
        Ok(session)
    }

    /// Wrap an already-resolved entry-point table. Loads no libraries.
    ///
    /// # Safety
    ///
    /// Every pointer in `api` must be callable with the declared C signature
    /// for the whole lifetime of the returned session, and the vector getters
    /// must write at most `getLogSamples()` values.
    #[allow(unsafe_code)]
    pub unsafe fn from_api(api: EngineApi) -> Self {
        Self {
            api,
            _library: None,
            _not_sync: PhantomData,
        }
    }

    /// Load a component library into the engine.
    ///
    /// The path must name an existing file; whether the engine accepts it is
    /// up to the engine.
    #[allow(unsafe_code)]
    pub fn load_component_library(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(HopsanError::ComponentLibraryNotFound {
                path: path.to_path_buf(),
            });
        }
        let encoded = path_to_cstring(path, "component library path")?;
        debug!(path = %path.display(), "loading component library");
        unsafe { (self.api.load_library)(encoded.as_ptr()) };
        Ok(())
    }

    /// Load a model file, replacing the engine's current model.
    #[allow(unsafe_code)]
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let encoded = path_to_cstring(path, "model path")?;
        debug!(path = %path.display(), "loading model");
        unsafe { (self.api.load_model)(encoded.as_ptr()) };
        Ok(())
    }

    /// Run the loaded model to completion. Blocks for the whole run.
    #[allow(unsafe_code)]
    pub fn simulate(&mut self) {
        trace!("simulate");
        unsafe { (self.api.simulate)() };
    }

    /// Number of samples the engine currently holds per result vector.
    #[allow(unsafe_code)]
    pub fn log_samples(&self) -> Result<usize> {
        let reported = unsafe { (self.api.get_log_samples)() };
        usize::try_from(reported).map_err(|_| HopsanError::NegativeSampleCount(reported))
    }

    /// The logged simulation time points.
    #[allow(unsafe_code)]
    pub fn time_vector(&self) -> Result<Vec<f64>> {
        let mut samples = self.sample_buffer()?;
        trace!(samples = samples.len(), "getTimeVector");
        unsafe { (self.api.get_time_vector)(samples.as_mut_ptr()) };
        Ok(samples)
    }

    /// The logged values of one channel, e.g. `"Volume.P1.p"`.
    #[allow(unsafe_code)]
    pub fn data_vector(&self, name: &str) -> Result<Vec<f64>> {
        let encoded = to_cstring(name, "data vector name")?;
        let mut samples = self.sample_buffer()?;
        trace!(name, samples = samples.len(), "getDataVector");
        unsafe { (self.api.get_data_vector)(encoded.as_ptr(), samples.as_mut_ptr()) };
        Ok(samples)
    }

    /// Set a component parameter. `value` is forwarded as text, verbatim;
    /// the engine parses it.
    #[allow(unsafe_code)]
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        let encoded_name = to_cstring(name, "parameter name")?;
        let encoded_value = to_cstring(value, "parameter value")?;
        trace!(name, value, "setParameter");
        unsafe { (self.api.set_parameter)(encoded_name.as_ptr(), encoded_value.as_ptr()) };
        Ok(())
    }

    /// Set the simulation start time.
    #[allow(unsafe_code)]
    pub fn set_start_time(&mut self, value: f64) {
        trace!(value, "setStartTime");
        unsafe { (self.api.set_start_time)(value) };
    }

    /// Set the simulation time step.
    #[allow(unsafe_code)]
    pub fn set_time_step(&mut self, value: f64) {
        trace!(value, "setTimeStep");
        unsafe { (self.api.set_time_step)(value) };
    }

    /// Set the simulation stop time.
    #[allow(unsafe_code)]
    pub fn set_stop_time(&mut self, value: f64) {
        trace!(value, "setStopTime");
        unsafe { (self.api.set_stop_time)(value) };
    }

    /// Set how many samples the engine logs per result vector.
    #[allow(unsafe_code)]
    pub fn set_log_samples(&mut self, value: i32) {
        trace!(value, "setLogSamples");
        unsafe { (self.api.set_log_samples)(value) };
    }

    /// Forward every field of `settings` through its setter: start time,
    /// time step, stop time, then log samples.
    pub fn apply_settings(&mut self, settings: &SimulationSettings) {
        self.set_start_time(settings.start_time);
        self.set_time_step(settings.time_step);
        self.set_stop_time(settings.stop_time);
        self.set_log_samples(settings.log_samples);
    }

    // The count is re-read for every buffer; `setLogSamples` or a new
    // simulation may have changed it since the last call.
    fn sample_buffer(&self) -> Result<Vec<f64>> {
        Ok(vec![UNFILLED_SAMPLE; self.log_samples()?])
    }
}

fn to_cstring(text: &str, argument: &'static str) -> Result<CString> {
    CString::new(text).map_err(|source| HopsanError::InteriorNul { argument, source })
}

fn path_to_cstring(path: &Path, argument: &'static str) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_string_lossy().into_owned().into_bytes();
    CString::new(bytes).map_err(|source| HopsanError::InteriorNul { argument, source })
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::{c_char, c_double, c_int, CStr};

    // Minimal in-module engine: enough to exercise the marshalling without
    // the stub crate.
    thread_local! {
        static SAMPLES: Cell<c_int> = const { Cell::new(3) };
        static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(call: String) {
        CALLS.with(|c| c.borrow_mut().push(call));
    }

    unsafe extern "C" fn load_library(path: *const c_char) {
        let path = unsafe { CStr::from_ptr(path) }.to_string_lossy();
        record(format!("loadLibrary {path}"));
    }
    unsafe extern "C" fn load_model(path: *const c_char) {
        let path = unsafe { CStr::from_ptr(path) }.to_string_lossy();
        record(format!("loadModel {path}"));
    }
    unsafe extern "C" fn simulate() {
        record("simulate".into());
    }
    unsafe extern "C" fn get_log_samples() -> c_int {
        SAMPLES.with(Cell::get)
    }
    unsafe extern "C" fn get_time_vector(out: *mut c_double) {
        let n = SAMPLES.with(Cell::get) as usize;
        for i in 0..n {
            unsafe { *out.add(i) = i as f64 * 0.5 };
        }
    }
    unsafe extern "C" fn get_data_vector(name: *const c_char, out: *mut c_double) {
        let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
        record(format!("getDataVector {name}"));
        let n = SAMPLES.with(Cell::get) as usize;
        for i in 0..n {
            unsafe { *out.add(i) = -(i as f64) };
        }
    }
    unsafe extern "C" fn set_parameter(name: *const c_char, value: *const c_char) {
        let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
        let value = unsafe { CStr::from_ptr(value) }.to_string_lossy();
        record(format!("setParameter {name}={value}"));
    }
    unsafe extern "C" fn set_time(value: c_double) {
        record(format!("setTime {value}"));
    }
    unsafe extern "C" fn set_log_samples(value: c_int) {
        SAMPLES.with(|s| s.set(value));
    }

    fn session() -> Hopsan {
        CALLS.with(|c| c.borrow_mut().clear());
        SAMPLES.with(|s| s.set(3));
        unsafe {
            Hopsan::from_api(EngineApi {
                load_library,
                load_model,
                simulate,
                get_log_samples,
                get_time_vector,
                get_data_vector,
                set_parameter,
                set_start_time: set_time,
                set_time_step: set_time,
                set_stop_time: set_time,
                set_log_samples,
            })
        }
    }

    fn calls() -> Vec<String> {
        CALLS.with(|c| c.borrow().clone())
    }

    #[test]
    fn time_vector_is_filled_by_engine() {
        let hopsan = session();
        assert_eq!(hopsan.time_vector().unwrap(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn data_vector_forwards_name() {
        let hopsan = session();
        assert_eq!(
            hopsan.data_vector("Mass.P2.x").unwrap(),
            vec![0.0, -1.0, -2.0]
        );
        assert_eq!(calls(), vec!["getDataVector Mass.P2.x".to_string()]);
    }

    #[test]
    fn sample_count_is_reread_per_call() {
        let mut hopsan = session();
        assert_eq!(hopsan.time_vector().unwrap().len(), 3);
        hopsan.set_log_samples(7);
        assert_eq!(hopsan.time_vector().unwrap().len(), 7);
        hopsan.set_log_samples(0);
        assert!(hopsan.data_vector("Mass.P2.x").unwrap().is_empty());
    }

    #[test]
    fn negative_sample_count_is_an_error() {
        let mut hopsan = session();
        hopsan.set_log_samples(-1);
        assert!(matches!(
            hopsan.time_vector(),
            Err(HopsanError::NegativeSampleCount(-1))
        ));
        assert!(matches!(
            hopsan.data_vector("x"),
            Err(HopsanError::NegativeSampleCount(-1))
        ));
    }

    #[test]
    fn interior_nul_is_rejected_before_forwarding() {
        let mut hopsan = session();
        let err = hopsan.set_parameter("Gain\0.k", "2").unwrap_err();
        assert!(matches!(
            err,
            HopsanError::InteriorNul {
                argument: "parameter name",
                ..
            }
        ));
        let err = hopsan.set_parameter("Gain.k", "2\0").unwrap_err();
        assert!(matches!(
            err,
            HopsanError::InteriorNul {
                argument: "parameter value",
                ..
            }
        ));
        assert!(calls().is_empty());
    }

    #[test]
    fn calls_are_forwarded_in_order() {
        let mut hopsan = session();
        hopsan.load_model("model.hmf").unwrap();
        hopsan.set_parameter("Gain.k", "2.5").unwrap();
        hopsan.set_stop_time(4.0);
        hopsan.simulate();
        assert_eq!(
            calls(),
            vec![
                "loadModel model.hmf".to_string(),
                "setParameter Gain.k=2.5".to_string(),
                "setTime 4".to_string(),
                "simulate".to_string(),
            ]
        );
    }

    #[test]
    fn missing_component_library_is_not_forwarded() {
        let mut hopsan = session();
        let err = hopsan
            .load_component_library("/nonexistent/libcomponents.so")
            .unwrap_err();
        assert!(matches!(err, HopsanError::ComponentLibraryNotFound { .. }));
        assert!(calls().is_empty());
    }
}
