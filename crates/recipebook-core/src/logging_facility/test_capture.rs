//! In-memory event capture for logging assertions in tests

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use recipebook_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};

/// One recorded event; every field is kept in text form
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_tracing(event: &Event<'_>) -> Self {
        let mut fields = FieldText::default();
        event.record(&mut fields);
        let fields = fields.0;
        Self {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    /// True for the lifecycle event `event` of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

// Integers and bools fall back to `record_debug`, whose output matches `to_string`.
#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    sink: Sink,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let sink = Sink::default();
        (
            Self { sink: sink.clone() },
            TestCapture { sink },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let captured = CapturedEvent::from_tracing(event);
        if let Ok(mut events) = self.sink.lock() {
            events.push(captured);
        }
    }
}

/// Read handle over captured events
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Most recent lifecycle event `event` of operation `op`
    pub fn last_event(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().rev().find(|e| e.is(op, event))
    }

    /// # Panics
    ///
    /// Panics when no event matches `op` and `event`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {event} event for op {op} among {} captured events",
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.sink.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (once per process)
///
/// Tests in one binary share the buffer, so assertions should filter on an
/// op name or entity id unique to the test.
///
/// ```
/// use recipebook_core::logging_facility::test_capture::init_test_capture;
/// use recipebook_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("my_operation");
/// capture.assert_event_exists("my_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
