//! Python bindings for the Hopsan simulation engine.
//!
//! This crate wraps the `hopsan` session in a PyO3 class. The native
//! extension is named `_hopsan` and is re-exported by the pure-Python
//! `hopsan` package, so existing scripts keep using
//! `hopsan.hopsan().getTimeVector()` and friends.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use pyo3::prelude::*;

mod error;
mod session;

/// The native `_hopsan` extension module.
#[pymodule]
fn _hopsan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<session::Hopsan>()?;
    // Lowercase alias for scripts written against the ctypes binding.
    m.add("hopsan", m.getattr("Hopsan")?)?;
    m.add("HOPSAN_HOME_VAR", hopsan::HOPSAN_HOME_VAR)?;
    Ok(())
}
