//! Recorded engine state and the exported entry points.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::ffi::{c_char, c_double, c_int, CStr};

use indexmap::IndexMap;

/// Log sample count of a freshly reset stub.
pub const DEFAULT_LOG_SAMPLES: c_int = 2048;

/// One scalar setter call, with the argument exactly as received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarCall {
    /// A `double` setter. `bits` is the raw IEEE-754 representation.
    Double { entry: &'static str, bits: u64 },
    /// An `int` setter.
    Int { entry: &'static str, value: c_int },
}

/// Everything the stub engine has been told.
#[derive(Clone, Debug, PartialEq)]
pub struct StubEngine {
    pub component_libraries: Vec<String>,
    pub models: Vec<String>,
    pub simulations: usize,
    /// Current parameter values, in first-set order.
    pub parameters: IndexMap<String, String>,
    /// Every `setParameter` call, in order.
    pub parameter_calls: Vec<(String, String)>,
    pub scalar_calls: Vec<ScalarCall>,
    pub start_time: f64,
    pub time_step: f64,
    pub stop_time: f64,
    pub log_samples: c_int,
    pub data_requests: Vec<String>,
}

impl Default for StubEngine {
    fn default() -> Self {
        Self {
            component_libraries: Vec::new(),
            models: Vec::new(),
            simulations: 0,
            parameters: IndexMap::new(),
            parameter_calls: Vec::new(),
            scalar_calls: Vec::new(),
            start_time: 0.0,
            time_step: 0.001,
            stop_time: 10.0,
            log_samples: DEFAULT_LOG_SAMPLES,
            data_requests: Vec::new(),
        }
    }
}

impl StubEngine {
    /// Evenly spaced time points from start to stop time, one per log sample.
    pub fn time_points(&self) -> Vec<f64> {
        let n = usize::try_from(self.log_samples).unwrap_or(0);
        match n {
            0 => Vec::new(),
            1 => vec![self.start_time],
            _ => {
                let span = self.stop_time - self.start_time;
                (0..n)
                    .map(|i| self.start_time + span * i as f64 / (n - 1) as f64)
                    .collect()
            }
        }
    }

    /// Values the stub reports for data channel `name`: the time points
    /// scaled by the length of the name.
    pub fn channel_values(&self, name: &str) -> Vec<f64> {
        let scale = name.len() as f64;
        self.time_points().into_iter().map(|t| t * scale).collect()
    }
}

thread_local! {
    static ENGINE: RefCell<StubEngine> = RefCell::new(StubEngine::default());
}

fn with_engine<R>(f: impl FnOnce(&mut StubEngine) -> R) -> R {
    ENGINE.with(|engine| f(&mut engine.borrow_mut()))
}

/// Restore this thread's stub engine to its initial state.
pub fn reset() {
    with_engine(|engine| *engine = StubEngine::default());
}

/// Copy of this thread's stub engine state.
pub fn snapshot() -> StubEngine {
    with_engine(|engine| engine.clone())
}

/// Change the reported sample count without recording a setter call.
pub fn force_log_samples(samples: c_int) {
    with_engine(|engine| engine.log_samples = samples);
}

/// # Safety
///
/// `ptr` must be a valid NUL-terminated string.
unsafe fn text(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// # Safety
///
/// `out` must be valid for writes of `values.len()` doubles.
unsafe fn fill(out: *mut c_double, values: &[f64]) {
    if !values.is_empty() {
        unsafe { std::ptr::copy_nonoverlapping(values.as_ptr(), out, values.len()) };
    }
}

/// Record a component library load.
///
/// # Safety
///
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn loadLibrary(path: *const c_char) {
    let path = unsafe { text(path) };
    with_engine(|engine| engine.component_libraries.push(path));
}

/// Record a model load.
///
/// # Safety
///
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn loadModel(path: *const c_char) {
    let path = unsafe { text(path) };
    with_engine(|engine| engine.models.push(path));
}

/// Count a simulation run.
#[no_mangle]
pub extern "C" fn simulate() {
    with_engine(|engine| engine.simulations += 1);
}

/// Current log sample count.
#[no_mangle]
pub extern "C" fn getLogSamples() -> c_int {
    with_engine(|engine| engine.log_samples)
}

/// Fill `out` with the stub's time points.
///
/// # Safety
///
/// `out` must be valid for writes of `getLogSamples()` doubles.
#[no_mangle]
pub unsafe extern "C" fn getTimeVector(out: *mut c_double) {
    let values = with_engine(|engine| engine.time_points());
    unsafe { fill(out, &values) };
}

/// Record the requested channel and fill `out` with its values.
///
/// # Safety
///
/// `name` must be a valid NUL-terminated string and `out` valid for writes
/// of `getLogSamples()` doubles.
#[no_mangle]
pub unsafe extern "C" fn getDataVector(name: *const c_char, out: *mut c_double) {
    let name = unsafe { text(name) };
    let values = with_engine(|engine| {
        let values = engine.channel_values(&name);
        engine.data_requests.push(name);
        values
    });
    unsafe { fill(out, &values) };
}

/// Record a parameter assignment, as text.
///
/// # Safety
///
/// `name` and `value` must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn setParameter(name: *const c_char, value: *const c_char) {
    let name = unsafe { text(name) };
    let value = unsafe { text(value) };
    with_engine(|engine| {
        engine.parameter_calls.push((name.clone(), value.clone()));
        engine.parameters.insert(name, value);
    });
}

/// Record the start time, bit for bit.
#[no_mangle]
pub extern "C" fn setStartTime(value: c_double) {
    with_engine(|engine| {
        engine.scalar_calls.push(ScalarCall::Double {
            entry: "setStartTime",
            bits: value.to_bits(),
        });
        engine.start_time = value;
    });
}

/// Record the solver time step, bit for bit.
#[no_mangle]
pub extern "C" fn setTimeStep(value: c_double) {
    with_engine(|engine| {
        engine.scalar_calls.push(ScalarCall::Double {
            entry: "setTimeStep",
            bits: value.to_bits(),
        });
        engine.time_step = value;
    });
}

/// Record the stop time, bit for bit.
#[no_mangle]
pub extern "C" fn setStopTime(value: c_double) {
    with_engine(|engine| {
        engine.scalar_calls.push(ScalarCall::Double {
            entry: "setStopTime",
            bits: value.to_bits(),
        });
        engine.stop_time = value;
    });
}

/// Record the log sample count. Later vector requests use it.
#[no_mangle]
pub extern "C" fn setLogSamples(value: c_int) {
    with_engine(|engine| {
        engine.scalar_calls.push(ScalarCall::Int {
            entry: "setLogSamples",
            value,
        });
        engine.log_samples = value;
    });
}
