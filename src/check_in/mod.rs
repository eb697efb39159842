mod submitter;

pub use submitter::{CheckInError, CheckInOutcome, CheckInSubmitter, Clock, OFFLINE_NOTICE};
