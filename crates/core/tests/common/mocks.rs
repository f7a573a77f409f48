use mockall::mock;
use oosim_core::common::TraceError;
use oosim_core::trace::{TraceRecord, TraceSource};

mock! {
    pub Trace {}

    impl TraceSource for Trace {
        fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError>;
    }
}
