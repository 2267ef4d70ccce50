//! # Event bus for log records.
//!
//! [`EventBus`] is an ordered registry of [`Handler`]s with synchronous fan-out.
//! Every [`LogData`] published is handed to each registered handler, in
//! registration order, on the publisher's own stack.
//!
//! ## Rules
//! - **Synchronous**: `publish()` returns only after every handler has run.
//! - **Snapshot delivery**: the registry is copied before fan-out, so handlers may
//!   log, register or unregister re-entrantly. Changes apply from the next publish.
//! - **No isolation**: a panicking handler unwinds through `publish()`; handlers
//!   registered after it do not see that event.
//! - **Identity removal**: handlers are removed by pointer identity; duplicates are
//!   independent entries and `unregister` removes the first match only.
//!
//! The process-wide bus returned by [`global_bus`] is created on first use and
//! seeded with the default handler, so output is visible without any setup.

use crate::core::event::LogData;
use crate::core::filter::FilterOptions;
use crate::core::logger::Logger;
use crate::diagnostics::{global_diagnostics, Diagnostics};
use crate::sinks::default_handler::DefaultHandler;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A subscriber invoked for every published record it is not filtered out of.
///
/// Cloning is cheap and preserves identity: any clone removes the original
/// registration.
#[derive(Clone)]
pub struct Handler {
    func: Arc<dyn Fn(&LogData) + Send + Sync>,
}

impl Handler {
    /// Wraps a closure as a handler.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&LogData) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invokes the handler.
    pub fn call(&self, data: &LogData) {
        (self.func)(data)
    }

    /// Whether `self` and `other` are the same handler reference.
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// Ordered handler registry with synchronous fan-out.
///
/// Clones share the same registry.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<Vec<Handler>>>,
    seed: Option<Handler>,
    diagnostics: Arc<Diagnostics>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
            seed: None,
            diagnostics: global_diagnostics(),
        }
    }

    /// Creates a bus seeded with the default handler.
    pub fn with_default_handler() -> Self {
        Self::with_handler(DefaultHandler::default())
    }

    /// Creates a bus seeded with `handler`; [`EventBus::reset`] restores it.
    pub fn with_handler(handler: DefaultHandler) -> Self {
        let bus = Self {
            seed: Some(handler.into_handler()),
            ..Self::new()
        };
        bus.seed_registry();
        bus
    }

    /// Counts publishes into `diagnostics` instead of the process-wide counters.
    pub fn with_diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    fn registry(&self) -> MutexGuard<'_, Vec<Handler>> {
        // A handler panic never happens under this lock, but recover anyway.
        match self.handlers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn seed_registry(&self) {
        if let Some(seed) = &self.seed {
            let mut handlers = self.registry();
            if handlers.is_empty() {
                handlers.push(seed.clone());
            }
        }
    }

    /// Returns a logger bound to `tag` that publishes on this bus.
    pub fn logger<T: Into<String>>(&self, tag: T) -> Logger {
        Logger::with_bus(tag, self.clone())
    }

    /// Delivers `data` to every registered handler, in registration order.
    pub fn publish(&self, data: &LogData) {
        let snapshot: Vec<Handler> = self.registry().clone();
        self.diagnostics.increment_events_published();
        for handler in &snapshot {
            handler.call(data);
        }
    }

    /// Appends `handler` and returns it for later removal.
    pub fn register(&self, handler: Handler) -> Handler {
        self.registry().push(handler.clone());
        tracing::debug!(target: "logga::bus", "handler registered");
        handler
    }

    /// Removes the first registration of `handler`. Returns whether one was found.
    pub fn unregister(&self, handler: &Handler) -> bool {
        let removed = {
            let mut handlers = self.registry();
            match handlers.iter().position(|h| h.same_as(handler)) {
                Some(index) => {
                    handlers.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            tracing::debug!(target: "logga::bus", "handler removed");
        }
        removed
    }

    /// Empties the registry.
    pub fn unregister_all(&self) {
        self.registry().clear();
        tracing::debug!(target: "logga::bus", "all handlers removed");
    }

    /// Snapshot of the current registrations.
    pub fn list(&self) -> Vec<Handler> {
        self.registry().clone()
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    /// Registers `handler` unchanged.
    pub fn add_handler(&self, handler: Handler) -> Handler {
        self.register(handler)
    }

    /// Registers `handler` behind `filter`.
    ///
    /// With an empty filter the handler itself is registered and returned.
    /// Otherwise the returned wrapper is the removal key, not `handler`.
    pub fn add_filtered_handler(&self, handler: Handler, filter: FilterOptions) -> Handler {
        self.register(filter.wrap(handler))
    }

    /// Removes the first registration of `handler`.
    pub fn remove_handler(&self, handler: &Handler) -> bool {
        self.unregister(handler)
    }

    /// Removes every handler.
    pub fn remove_handlers(&self) {
        self.unregister_all()
    }

    /// Alias of [`EventBus::remove_handlers`].
    pub fn remove_all_handlers(&self) {
        self.unregister_all()
    }

    /// Atomically replaces every registration with `handler`.
    pub fn replace_handlers(&self, handler: Handler) -> Handler {
        {
            let mut handlers = self.registry();
            handlers.clear();
            handlers.push(handler.clone());
        }
        tracing::debug!(target: "logga::bus", "handlers replaced");
        handler
    }

    /// Snapshot of the current registrations.
    pub fn handlers(&self) -> Vec<Handler> {
        self.list()
    }

    /// Restores the initial state: only the seeded handler registered, if any.
    pub fn reset(&self) {
        self.registry().clear();
        self.seed_registry();
    }
}

static GLOBAL_BUS: Lazy<EventBus> = Lazy::new(EventBus::with_default_handler);

/// The process-wide bus, seeded with the default handler on first use.
pub fn global_bus() -> &'static EventBus {
    &GLOBAL_BUS
}
