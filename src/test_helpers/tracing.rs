//! Tracing capture for unit tests.
//!
//! A recording subscriber is installed for the duration of a closure. Each
//! event is kept with its level, target, message and fields rendered as
//! strings, so assertions compare plain text:
//!
//! ```ignore
//! let event = capture_single_event(|| tracing::warn!(cycle = 1, "oops"));
//! assert_eq!(event.field("cycle"), Some("1"));
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event,
    Level,
    Metadata,
    Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};

/// One event seen by the recording subscriber.
#[derive(Debug)]
pub(crate) struct RecordedEvent {
    level: Level,
    target: String,
    fields: HashMap<String, String>,
    message: Option<String>,
}

impl RecordedEvent {
    pub(crate) const fn level(&self) -> Level { self.level }

    pub(crate) fn target(&self) -> &str { &self.target }

    /// Field value by name; the message is not a field.
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub(crate) fn message(&self) -> Option<&str> { self.message.as_deref() }
}

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl Recorder {
    // A panicking test thread must not hide the events recorded before it.
    fn events(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[derive(Default)]
struct Fields {
    values: HashMap<String, String>,
    message: Option<String>,
}

impl Fields {
    fn insert(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            name => {
                self.values.insert(name.to_owned(), value);
            }
        }
    }
}

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) { self.insert(field, value.to_owned()); }
}

impl Subscriber for Recorder {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool { true }

    fn new_span(&self, _attrs: &Attributes<'_>) -> Id { Id::from_u64(1) }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let metadata = event.metadata();
        self.events().push(RecordedEvent {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields: fields.values,
            message: fields.message,
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Every event emitted by `f`, in order.
pub(crate) fn capture_events(f: impl FnOnce()) -> Vec<RecordedEvent> {
    let recorder = Recorder::default();
    let dispatch = tracing::Dispatch::new(recorder.clone());
    tracing::dispatcher::with_default(&dispatch, f);
    std::mem::take(&mut *recorder.events())
}

/// Events emitted by `f` under `target`, in order.
pub(crate) fn capture_target(target: &str, f: impl FnOnce()) -> Vec<RecordedEvent> {
    capture_events(f)
        .into_iter()
        .filter(|event| event.target() == target)
        .collect()
}

/// The only event emitted by `f`.
pub(crate) fn capture_single_event(f: impl FnOnce()) -> RecordedEvent {
    let mut events = capture_events(f).into_iter();
    match (events.next(), events.next()) {
        (Some(event), None) => event,
        (first, second) => {
            panic!("expected exactly one tracing event, got {first:?} then {second:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_level_message_and_fields_in_order() {
        let events = capture_events(|| {
            tracing::info!(cycle = 1_u64, label = "BoC", "first");
            tracing::debug!(holds = false, "second");
        });
        let messages: Vec<_> = events.iter().filter_map(RecordedEvent::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
        let Some(first) = events.first() else {
            panic!("two events were emitted");
        };
        assert_eq!(first.level(), Level::INFO);
        assert_eq!(first.field("cycle"), Some("1"));
        assert_eq!(first.field("label"), Some("BoC"));
        assert_eq!(first.field("message"), None);
    }

    #[test]
    fn target_filter_drops_other_targets() {
        let events = capture_target("wanted", || {
            tracing::warn!(target: "wanted", "kept");
            tracing::warn!(target: "other", "dropped");
        });
        assert_eq!(events.len(), 1);
        assert!(events.iter().all(|event| event.target() == "wanted"));
    }
}
