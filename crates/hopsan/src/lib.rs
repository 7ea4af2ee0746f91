//! Rust bindings to the native Hopsan simulation engine.
//!
//! The engine itself (solver, component model, model file format) lives in
//! the pre-built `hopsanc` shared library. This crate loads that library,
//! resolves its C entry points into a typed [`EngineApi`] table, and wraps
//! them in the [`Hopsan`] session object, which handles string encoding,
//! scalar marshalling and result-buffer allocation.
//!
//! ```no_run
//! use hopsan::Hopsan;
//!
//! # fn main() -> Result<(), hopsan::HopsanError> {
//! let mut hopsan = Hopsan::new()?;
//! hopsan.load_model("models/pressure_relief.hmf")?;
//! hopsan.set_stop_time(5.0);
//! hopsan.simulate();
//! let time = hopsan.time_vector()?;
//! let pressure = hopsan.data_vector("Volume.P1.p")?;
//! assert_eq!(time.len(), pressure.len());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod settings;

pub use api::EngineApi;
pub use config::{EngineConfig, HOPSAN_HOME_VAR};
pub use error::{HopsanError, Result};
pub use session::Hopsan;
pub use settings::SimulationSettings;
