//! Record formatting
//!
//! Normalizes a payload into a flat field record, attaching the level,
//! timestamp, and message metadata under configurable field names. An
//! empty field name suppresses that field entirely.

use super::format::Record;
use super::level::Level;
use super::payload::{FieldValue, Payload};
use super::timestamp::TimestampFormat;

/// Field-name configuration applied to every record.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    /// Key for the level field; empty suppresses it
    pub level_field: String,
    /// Key for the timestamp field; empty suppresses it
    pub timestamp_field: String,
    /// Format for the timestamp field value
    pub timestamp_format: TimestampFormat,
    /// Key for the message field; empty suppresses it
    pub message_field: String,
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self {
            level_field: "level".to_string(),
            timestamp_field: "ts".to_string(),
            timestamp_format: TimestampFormat::default(),
            message_field: "msg".to_string(),
        }
    }
}

impl RecordFormatter {
    /// Build a record for the payload, stamped with the current time.
    pub fn record(&self, level: Level, payload: &Payload) -> Record {
        self.record_at(level, payload, &self.timestamp_format.now())
    }

    /// Build a record with an explicit timestamp value. Formatting is
    /// deterministic: the same payload and timestamp yield byte-identical
    /// serialized output.
    pub fn record_at(&self, level: Level, payload: &Payload, timestamp: &str) -> Record {
        match payload {
            Payload::Message(message) => self.message_record(level, message.clone(), timestamp),
            Payload::Fault(text) => {
                // multi-line error text must stay one record
                self.message_record(level, text.replace('\n', ": "), timestamp)
            }
            Payload::Fields(map) => {
                let mut fields = map.clone();
                if !self.level_field.is_empty() {
                    fields.insert(self.level_field.clone(), FieldValue::from(level.as_str()));
                }
                if !self.timestamp_field.is_empty() {
                    fields.insert(self.timestamp_field.clone(), FieldValue::from(timestamp));
                }
                Record::Fields(fields.into_iter().collect())
            }
            Payload::Raw(value) => Record::Raw(value.clone()),
        }
    }

    /// Header-ordered record: level, timestamp, message. The timestamp is
    /// inserted only if the key is not already taken (first writer wins).
    fn message_record(&self, level: Level, message: String, timestamp: &str) -> Record {
        let mut pairs = Vec::with_capacity(3);
        if !self.level_field.is_empty() {
            pairs.push((self.level_field.clone(), FieldValue::from(level.as_str())));
        }
        if !self.timestamp_field.is_empty()
            && pairs.iter().all(|(key, _)| key != &self.timestamp_field)
        {
            pairs.push((self.timestamp_field.clone(), FieldValue::from(timestamp)));
        }
        if !self.message_field.is_empty() {
            pairs.push((self.message_field.clone(), FieldValue::String(message)));
        }
        Record::Fields(pairs)
    }
}
