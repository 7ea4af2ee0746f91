//! Typed table of the engine's C entry points.
//!
//! Every pointer carries the exact C signature of its entry point, so
//! scalars cross the boundary as `double` and `int` rather than whatever a
//! variadic call would promote them to.

use std::ffi::{c_char, c_double, c_int};

use libloading::Library;

use crate::error::{HopsanError, Result};

/// `void loadLibrary(const char* path)`
pub type LoadLibraryFn = unsafe extern "C" fn(path: *const c_char);
/// `void loadModel(const char* path)`
pub type LoadModelFn = unsafe extern "C" fn(path: *const c_char);
/// `void simulate(void)`
pub type SimulateFn = unsafe extern "C" fn();
/// `int getLogSamples(void)`
pub type GetLogSamplesFn = unsafe extern "C" fn() -> c_int;
/// `void getTimeVector(double* out)`
pub type GetTimeVectorFn = unsafe extern "C" fn(out: *mut c_double);
/// `void getDataVector(const char* name, double* out)`
pub type GetDataVectorFn = unsafe extern "C" fn(name: *const c_char, out: *mut c_double);
/// `void setParameter(const char* name, const char* value)`
pub type SetParameterFn = unsafe extern "C" fn(name: *const c_char, value: *const c_char);
/// `void setStartTime(double)`, `setTimeStep`, `setStopTime`
pub type SetTimeFn = unsafe extern "C" fn(value: c_double);
/// `void setLogSamples(int)`
pub type SetLogSamplesFn = unsafe extern "C" fn(value: c_int);

/// Entry points of a loaded engine, one function pointer per symbol.
///
/// The pointers stay valid only while the library they were resolved from
/// is loaded; [`Hopsan`](crate::Hopsan) keeps the two together.
#[derive(Clone, Copy, Debug)]
pub struct EngineApi {
    /// `loadLibrary`
    pub load_library: LoadLibraryFn,
    /// `loadModel`
    pub load_model: LoadModelFn,
    /// `simulate`
    pub simulate: SimulateFn,
    /// `getLogSamples`
    pub get_log_samples: GetLogSamplesFn,
    /// `getTimeVector`
    pub get_time_vector: GetTimeVectorFn,
    /// `getDataVector`
    pub get_data_vector: GetDataVectorFn,
    /// `setParameter`
    pub set_parameter: SetParameterFn,
    /// `setStartTime`
    pub set_start_time: SetTimeFn,
    /// `setTimeStep`
    pub set_time_step: SetTimeFn,
    /// `setStopTime`
    pub set_stop_time: SetTimeFn,
    /// `setLogSamples`
    pub set_log_samples: SetLogSamplesFn,
}

impl EngineApi {
    /// Resolve every entry point from `library`.
    ///
    /// Fails with [`HopsanError::MissingSymbol`] on the first absent symbol.
    ///
    /// # Safety
    ///
    /// The library must export these symbols with the C signatures declared
    /// by the pointer types in this module.
    #[allow(unsafe_code)]
    pub unsafe fn resolve(library: &Library) -> Result<Self> {
        unsafe {
            Ok(Self {
                load_library: symbol(library, "loadLibrary")?,
                load_model: symbol(library, "loadModel")?,
                simulate: symbol(library, "simulate")?,
                get_log_samples: symbol(library, "getLogSamples")?,
                get_time_vector: symbol(library, "getTimeVector")?,
                get_data_vector: symbol(library, "getDataVector")?,
                set_parameter: symbol(library, "setParameter")?,
                set_start_time: symbol(library, "setStartTime")?,
                set_time_step: symbol(library, "setTimeStep")?,
                set_stop_time: symbol(library, "setStopTime")?,
                set_log_samples: symbol(library, "setLogSamples")?,
            })
        }
    }
}

#[allow(unsafe_code)]
unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T> {
    let sym = unsafe { library.get::<T>(name.as_bytes()) }
        .map_err(|source| HopsanError::MissingSymbol {
            symbol: name,
            source,
        })?;
    Ok(*sym)
}
