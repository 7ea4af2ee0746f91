//! HopsanError -> Python exception mapping.

use hopsan::HopsanError;
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::PyErr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExceptionKind {
    OsError,
    ValueError,
    RuntimeError,
}

fn exception_kind(err: &HopsanError) -> ExceptionKind {
    match err {
        // Loader and file-system failures → OSError, as ctypes raises them.
        HopsanError::LibraryLoad { .. }
        | HopsanError::MissingSymbol { .. }
        | HopsanError::ComponentLibraryNotFound { .. } => ExceptionKind::OsError,

        // Caller-supplied text or environment → ValueError
        HopsanError::MissingInstallRoot { .. }
        | HopsanError::InvalidInstallRoot { .. }
        | HopsanError::InteriorNul { .. } => ExceptionKind::ValueError,

        HopsanError::NegativeSampleCount(_) => ExceptionKind::RuntimeError,
    }
}

/// Convert a binding error into the matching Python exception.
pub(crate) fn to_py_err(err: HopsanError) -> PyErr {
    let message = format!("hopsan: {err}");
    match exception_kind(&err) {
        ExceptionKind::OsError => PyOSError::new_err(message),
        ExceptionKind::ValueError => PyValueError::new_err(message),
        ExceptionKind::RuntimeError => PyRuntimeError::new_err(message),
    }
}
