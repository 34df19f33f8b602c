//! Submission sinks - where a completed registration goes

use crate::core::record::RegistrationRecord;

/// Receives the record once the last step succeeds
pub trait SubmissionSink {
    fn accept(&mut self, record: &RegistrationRecord);
}

/// Logs the submitted record; nothing is transmitted or stored
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn accept(&mut self, record: &RegistrationRecord) {
        let store = record
            .business
            .as_ref()
            .map(|b| b.store_name.as_str())
            .unwrap_or_default();
        match serde_json::to_string(record) {
            Ok(json) => tracing::info!(store, record = %json, "registration submitted"),
            Err(e) => tracing::warn!(store, error = %e, "registration submitted but could not be serialized"),
        }
    }
}

/// Keeps submitted records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<RegistrationRecord>,
}

impl SubmissionSink for MemorySink {
    fn accept(&mut self, record: &RegistrationRecord) {
        self.records.push(record.clone());
    }
}
