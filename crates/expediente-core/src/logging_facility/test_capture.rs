//! In-memory event capture for logging assertions in tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use expediente_core_types::schema::{EVENT_WARNING, FIELD_ERR_CODE};

/// One captured log event, fields rendered to strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_warning(&self) -> bool {
        self.event.as_deref() == Some(EVENT_WARNING)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type EventBuffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    events: EventBuffer,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events: EventBuffer = Arc::default();
        (
            Self {
                events: Arc::clone(&events),
            },
            TestCapture { events },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get("component").cloned(),
            op: visitor.fields.get("op").cloned(),
            event: visitor.fields.get("event").cloned(),
            fields: visitor.fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle for reading captured events
#[derive(Clone)]
pub struct TestCapture {
    events: EventBuffer,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events carrying the given `op` field
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Issue events (`event = "warning"`), in emission order
    pub fn warnings(&self) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.is_warning()).collect()
    }

    /// # Panics
    ///
    /// Panics if no event matches `op` and `event`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "no event op={} event={} among {} captured",
            op,
            event,
            events.len()
        );
    }

    /// # Panics
    ///
    /// Panics if no issue event carries `code`
    pub fn assert_warning_code(&self, code: &str) {
        let warnings = self.warnings();
        assert!(
            warnings.iter().any(|e| e.field(FIELD_ERR_CODE) == Some(code)),
            "no warning with {}={} among {} warnings",
            FIELD_ERR_CODE,
            code,
            warnings.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber globally and return a handle to it
///
/// The subscriber is process-wide, so tests sharing a binary see each
/// other's events; filter by `op` or a unique id when asserting.
///
/// # Example
///
/// ```
/// use expediente_core::logging_facility::test_capture::init_test_capture;
/// use expediente_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("plan_export");
/// capture.assert_event_exists("plan_export", "start");
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
