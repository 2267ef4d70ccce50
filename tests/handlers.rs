//! 全局总线集成测试
//!
//! 所有测试共享进程级总线，因此用同一把锁串行执行；在发出 error 事件之前必须先替换掉默认处理器。

use logga::sinks::{MemorySink, RecordedExit};
use logga::{
    add_filtered_handler, add_handler, get_logger, global_bus, handlers, remove_all_handlers,
    remove_handler, remove_handlers, replace_handlers, DefaultHandler, DefaultHandlerOptions,
    FilterOptions, Handler, LogData, LogEvent, LogLevel, ThrottleOptions, ThrottleState,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

static BUS_LOCK: Mutex<()> = Mutex::new(());

fn lock_bus() -> MutexGuard<'static, ()> {
    let guard = BUS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    global_bus().reset();
    guard
}

fn recorder() -> (Handler, Arc<Mutex<Vec<LogData>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let handler = Handler::new(move |data: &LogData| sink.lock().unwrap().push(data.clone()));
    (handler, events)
}

fn captured_default(options: DefaultHandlerOptions) -> (Handler, MemorySink, RecordedExit) {
    let sink = MemorySink::new();
    let exit = RecordedExit::new();
    let handler = DefaultHandler::new(options)
        .with_sink(sink.clone())
        .with_exit(exit.clone())
        .with_throttle_state(ThrottleState::new())
        .into_handler();
    (handler, sink, exit)
}

#[test]
fn reset_restores_the_default_handler() {
    let _guard = lock_bus();
    let seeded = handlers();
    assert_eq!(seeded.len(), 1);

    remove_handlers();
    assert!(handlers().is_empty());
    global_bus().reset();
    assert_eq!(handlers(), seeded);
}

#[test]
fn logging_reaches_added_handler() {
    let _guard = lock_bus();
    let (handler, events) = recorder();
    replace_handlers(handler);

    let log = get_logger("tests:logging");
    log.debug("a debug message");
    log.info(LogEvent::structured("an info message").with_stack("Just a made up trace"));
    log.warn("a warning message");
    log.error("an error message");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].tag, "tests:logging");
    assert_eq!(events[0].level, LogLevel::Debug);
    assert_eq!(events[0].message, "a debug message");
    assert!(events[0].stack.is_none());
    assert_eq!(events[1].stack.as_deref(), Some("Just a made up trace"));
    assert_eq!(events[2].level, LogLevel::Warn);
    assert_eq!(events[3].level, LogLevel::Error);
}

#[test]
fn adding_and_removing_handlers() {
    let _guard = lock_bus();
    let log = get_logger("tests:handlers");
    let events = Arc::new(Mutex::new(0usize));
    let counting = || {
        let events = Arc::clone(&events);
        Handler::new(move |_| *events.lock().unwrap() += 1)
    };
    let count = || *events.lock().unwrap();

    replace_handlers(counting());
    log.info("");
    assert_eq!(count(), 1);

    add_handler(counting());
    log.info("");
    assert_eq!(count(), 3);

    let third = add_handler(counting());
    log.info("");
    assert_eq!(count(), 6);

    assert!(remove_handler(&third));
    log.info("");
    assert_eq!(count(), 8);

    remove_handlers();
    log.info("");
    assert_eq!(count(), 8);
    assert!(handlers().is_empty());
}

#[test]
fn filtered_handler_on_global_bus() {
    let _guard = lock_bus();
    let (handler, events) = recorder();
    remove_all_handlers();
    let wrapper = add_filtered_handler(
        handler.clone(),
        FilterOptions::new()
            .tags(["db"])
            .max_level(LogLevel::Warn)
            .message_pattern("timeout")
            .unwrap(),
    );
    assert_ne!(wrapper, handler);

    get_logger("db").error("connection timeout");
    get_logger("db").info("query timeout");
    get_logger("web").error("request timeout");
    get_logger("db").warn("slow query");

    assert_eq!(events.lock().unwrap().len(), 1);
    assert!(!remove_handler(&handler));
    assert!(remove_handler(&wrapper));
}

#[test]
fn default_handler_level_option() {
    let _guard = lock_bus();
    let log = get_logger("logger");

    let (handler, sink, _) = captured_default(DefaultHandlerOptions::default());
    replace_handlers(handler);
    log.debug("a debug message");
    assert_eq!(sink.len(), 0);

    let (handler, sink, _) = captured_default(DefaultHandlerOptions::new().max_level(LogLevel::Debug));
    replace_handlers(handler);
    log.debug("a debug message");
    assert_eq!(sink.len(), 1);

    let (handler, sink, _) = captured_default(DefaultHandlerOptions::new().max_level(LogLevel::Warn));
    replace_handlers(handler);
    log.debug("a debug message");
    log.warn("a warn message");
    assert_eq!(sink.len(), 1);
}

#[test]
fn default_handler_throttle_with_real_clock() {
    let _guard = lock_bus();
    let log = get_logger("logger");
    let (handler, sink, exit) = captured_default(
        DefaultHandlerOptions::new().throttle(ThrottleOptions::new("${message}", 200)),
    );
    replace_handlers(handler);

    log.error("a message");
    assert_eq!(sink.len(), 1);

    log.error("a message");
    assert_eq!(sink.len(), 1);

    thread::sleep(Duration::from_millis(300));

    log.error("a message");
    assert_eq!(sink.len(), 2);

    log.error("a different message");
    assert_eq!(sink.len(), 3);

    // 只有真正输出的 error 会触发退出
    assert_eq!(exit.codes(), vec![1, 1, 1]);
}

#[test]
fn non_interactive_output_is_json() {
    let _guard = lock_bus();
    let (handler, sink, exit) = captured_default(DefaultHandlerOptions::default());
    replace_handlers(handler);

    get_logger("tests:non-tty").error(LogEvent::structured("an error message").with_stack("at test"));

    let line = sink.lines().pop().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    let time = parsed["time"].as_str().unwrap();
    assert_eq!(time.len(), "2024-01-01T00:00:00.000Z".len());
    assert_eq!(parsed["level"], 0);
    assert_eq!(parsed["message"], "an error message");
    assert_eq!(parsed["stack"], "at test");
    assert_eq!(exit.codes(), vec![1]);
}

#[test]
fn interactive_output_is_pretty() {
    let _guard = lock_bus();
    let sink = MemorySink::with_interactive(true);
    let handler = DefaultHandler::new(DefaultHandlerOptions::new().exit_on_error(false))
        .with_sink(sink.clone())
        .into_handler();
    replace_handlers(handler);

    get_logger("tests:tty").error("an error message");

    let line = sink.lines().pop().unwrap();
    assert!(line.contains("ERROR"));
    assert!(line.ends_with("an error message"));
}
