//! The stub's exports as a `hopsan` entry-point table.

use hopsan::{EngineApi, Hopsan};

use crate::engine;

/// Entry-point table pointing at this crate's exports.
pub fn engine_api() -> EngineApi {
    EngineApi {
        load_library: engine::loadLibrary,
        load_model: engine::loadModel,
        simulate: engine::simulate,
        get_log_samples: engine::getLogSamples,
        get_time_vector: engine::getTimeVector,
        get_data_vector: engine::getDataVector,
        set_parameter: engine::setParameter,
        set_start_time: engine::setStartTime,
        set_time_step: engine::setTimeStep,
        set_stop_time: engine::setStopTime,
        set_log_samples: engine::setLogSamples,
    }
}

/// Reset this thread's stub engine and open a session over it.
pub fn stub_session() -> Hopsan {
    engine::reset();
    // SAFETY: the exports have exactly the table's signatures and write at
    // most `getLogSamples()` values into result buffers.
    unsafe { Hopsan::from_api(engine_api()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{snapshot, ScalarCall};

    #[test]
    fn table_routes_each_setter_to_its_export() {
        let mut hopsan = stub_session();
        hopsan.set_start_time(1.0);
        hopsan.set_time_step(2.0);
        hopsan.set_stop_time(3.0);
        hopsan.set_log_samples(4);
        assert_eq!(
            snapshot().scalar_calls,
            vec![
                ScalarCall::Double {
                    entry: "setStartTime",
                    bits: 1.0f64.to_bits()
                },
                ScalarCall::Double {
                    entry: "setTimeStep",
                    bits: 2.0f64.to_bits()
                },
                ScalarCall::Double {
                    entry: "setStopTime",
                    bits: 3.0f64.to_bits()
                },
                ScalarCall::Int {
                    entry: "setLogSamples",
                    value: 4
                },
            ]
        );
    }

    #[test]
    fn session_starts_from_a_clean_engine() {
        crate::engine::simulate();
        let _hopsan = stub_session();
        assert_eq!(snapshot().simulations, 0);
    }
}
