//! Shared test utilities used across randgraph crates.

pub mod tracing {
    //! Capture of spans and events for asserting on instrumentation.

    use std::{
        collections::BTreeMap,
        fmt,
        sync::{Arc, Mutex, MutexGuard},
    };

    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id, Record},
    };
    use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

    /// Structured fields keyed by name, rendered as strings.
    pub type Fields = BTreeMap<String, String>;

    /// Layer that keeps every closed span and every event it observes.
    ///
    /// Clones share storage, so a clone can be handed to a subscriber while
    /// this handle is kept for assertions.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        log: Arc<Mutex<Captured>>,
    }

    #[derive(Default)]
    struct Captured {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    /// Snapshot of a closed span.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from its metadata.
        pub name: String,
        /// Fields recorded at creation and through later `record` calls.
        pub fields: Fields,
    }

    /// Snapshot of an emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, normally the emitting module path.
        pub target: String,
        /// Event fields, including `message`.
        pub fields: Fields,
        /// Name of the innermost span open when the event fired.
        pub span: Option<String>,
    }

    impl EventRecord {
        /// Returns the formatted message, if the event carried one.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.fields.get("message").map(String::as_str)
        }
    }

    impl RecordingLayer {
        /// Closed spans in completion order.
        ///
        /// # Examples
        /// ```
        /// use randgraph_test_support::tracing::RecordingLayer;
        ///
        /// let layer = RecordingLayer::default();
        /// assert!(layer.spans().is_empty());
        /// ```
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.lock().spans.clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.lock().events.clone()
        }

        /// Returns the first closed span called `name`.
        #[must_use]
        pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
            self.lock().spans.iter().find(|span| span.name == name).cloned()
        }

        /// Returns every event whose message equals `message`.
        #[must_use]
        pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
            self.lock()
                .events
                .iter()
                .filter(|event| event.message() == Some(message))
                .cloned()
                .collect()
        }

        fn lock(&self) -> MutexGuard<'_, Captured> {
            self.log.lock().expect("recording lock poisoned")
        }
    }

    /// Runs `f` with a thread-local subscriber that records into a fresh
    /// layer, then returns the result alongside the layer.
    ///
    /// # Examples
    /// ```
    /// use randgraph_test_support::tracing::with_recording;
    ///
    /// let ((), layer) = with_recording(|| tracing::info!(answer = 42, "done"));
    /// let events = layer.events_with_message("done");
    /// assert_eq!(events[0].fields["answer"], "42");
    /// ```
    pub fn with_recording<T>(f: impl FnOnce() -> T) -> (T, RecordingLayer) {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let output = tracing::subscriber::with_default(subscriber, f);
        (output, layer)
    }

    struct OpenSpan {
        name: String,
        fields: Fields,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::new();
            attrs.record(&mut FieldCollector(&mut fields));
            span.extensions_mut().insert(OpenSpan {
                name: attrs.metadata().name().to_owned(),
                fields,
            });
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldCollector(&mut open.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(open) = span.extensions_mut().remove::<OpenSpan>() else {
                return;
            };
            self.lock().spans.push(SpanRecord {
                name: open.name,
                fields: open.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldCollector(&mut fields));
            let span = ctx.event_span(event).map(|span| span.name().to_owned());
            let metadata = event.metadata();
            self.lock().events.push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
                span,
            });
        }
    }

    struct FieldCollector<'a>(&'a mut Fields);

    impl FieldCollector<'_> {
        fn put(&mut self, field: &Field, value: impl ToString) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value);
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value);
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value);
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value);
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value);
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.put(field, value);
        }
    }
}

pub mod ci;
