//! tracing 桥接层
//!
//! 将 `tracing` 事件重新发布到 [`EventBus`]：事件目标作为标签，`message` 字段作为消息，
//! 其余字段以 `key=value` 追加在消息之后。本库自身目标下的事件被跳过，避免反馈循环。

use crate::core::bus::{global_bus, EventBus};
use crate::core::event::LogData;
use crate::core::level::LogLevel;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::Event;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

const INTERNAL_TARGET: &str = "logga";

fn is_internal(target: &str) -> bool {
    target == INTERNAL_TARGET
        || target
            .strip_prefix(INTERNAL_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// 把 tracing 事件发布到总线的处理层
#[derive(Debug, Clone)]
pub struct BusLayer {
    bus: EventBus,
}

impl BusLayer {
    /// 发布到指定总线
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// 发布到全局总线
    pub fn global() -> Self {
        Self::new(global_bus().clone())
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl MessageVisitor {
    fn record(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    fn into_message(self) -> String {
        let mut message = self.message;
        for (key, value) in self.fields {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&key);
            message.push('=');
            message.push_str(&value);
        }
        message
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }
}

impl<S> Layer<S> for BusLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal(metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let data = LogData::new(
            metadata.target(),
            LogLevel::from(*metadata.level()),
            visitor.into_message(),
        );
        self.bus.publish(&data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bus::Handler;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(bus: &EventBus) -> Arc<Mutex<Vec<LogData>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        bus.add_handler(Handler::new(move |data: &LogData| {
            sink.lock().unwrap().push(data.clone());
        }));
        events
    }

    #[test]
    fn test_internal_targets() {
        assert!(is_internal("logga"));
        assert!(is_internal("logga::bus"));
        assert!(!is_internal("loggable"));
        assert!(!is_internal("app::logga"));
    }

    #[test]
    fn test_tracing_events_are_published() {
        let bus = EventBus::new();
        let events = capture(&bus);
        let subscriber = tracing_subscriber::registry().with(BusLayer::new(bus.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app::db", rows = 3, "slow query");
            tracing::trace!(target: "app::db", "fine detail");
        });

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].tag, "app::db");
        assert_eq!(events[0].level, LogLevel::Warn);
        assert_eq!(events[0].message, "slow query rows=3");
        assert_eq!(events[1].level, LogLevel::Debug);
    }

    #[test]
    fn test_internal_events_are_skipped() {
        let bus = EventBus::new();
        let events = capture(&bus);
        let subscriber = tracing_subscriber::registry().with(BusLayer::new(bus.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "logga::sink", "write failed");
            // 注册处理器会产生 logga::bus 目标下的 debug 事件
            bus.add_handler(Handler::new(|_| {}));
        });

        assert!(events.lock().unwrap().is_empty());
    }
}
