//! Stub Hopsan engine for contract tests.
//!
//! Exports the eleven engine entry points with C linkage, so the crate can
//! stand in for `libhopsanc` either as a shared library (`cdylib`) or linked
//! directly into a test binary (`rlib`). Instead of simulating anything, the
//! stub records what it was called with in a [`StubEngine`] and fills result
//! buffers with predictable values.
//!
//! Recorded state is thread-local: each test thread sees its own engine.
//! [`stub_session`] resets it and hands back a [`hopsan::Hopsan`] wired to
//! the entry points; [`snapshot`] shows what the session forwarded.
//!
//! The build script writes `include/hopsan_stub.h`, the C declarations of
//! the stub's exports, for checking the engine ABI from C.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

mod engine;
mod session;

pub use engine::{
    getDataVector, getLogSamples, getTimeVector, loadLibrary, loadModel, setLogSamples,
    setParameter, setStartTime, setStopTime, setTimeStep, simulate,
};
pub use engine::{
    force_log_samples, reset, snapshot, ScalarCall, StubEngine, DEFAULT_LOG_SAMPLES,
};
pub use session::{engine_api, stub_session};
