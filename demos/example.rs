//! 生成示例输出
//!
//! 可读输出：
//!
//! ```bash
//! cargo run --example example
//! ```
//!
//! 机器可读输出：
//!
//! ```bash
//! cargo run --example example 2> log.json
//! ```

use anyhow::{Context, Result};
use logga::{
    default_handler, get_diagnostics, get_logger, replace_handlers, BusLayer, DefaultHandlerOptions,
    EnvConfig, Handler, LogEvent,
};
use tracing_subscriber::layer::SubscriberExt;

fn read_settings() -> Result<String> {
    std::fs::read_to_string("/nonexistent/settings.json").context("I am an error object.")
}

fn main() -> Result<()> {
    // 让示例跑完所有行；LOGGA_* 环境变量仍可覆盖
    let options = EnvConfig::apply(
        DefaultHandlerOptions::new()
            .show_stack(true)
            .exit_on_error(false),
    );
    replace_handlers(Handler::new(move |data| default_handler(data, Some(&options))));

    let log = get_logger("example");

    log.debug("This is line five.");
    log.info("Everything is just fine.");
    log.warn("Oh, oh, not so much.");
    log.error("Aaargh, an error!");

    if let Err(error) = read_settings() {
        let source: &(dyn std::error::Error + 'static) = error.as_ref();
        let event = LogEvent::from_error(source);
        log.error(match event {
            LogEvent::Structured { message, stack } => LogEvent::Structured {
                message: Some(format!(
                    "Woaaah something bad happened! {}",
                    message.unwrap_or_default()
                )),
                stack,
            },
            plain => plain,
        });
    }

    // tracing 事件同样会经过总线
    let subscriber = tracing_subscriber::registry().with(BusLayer::global());
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "example::tracing", attempt = 3, "retrying upstream");
    });

    let stats = get_diagnostics();
    log.info(format!(
        "published {} events, rendered {} lines",
        stats.events_published, stats.lines_rendered
    ));

    Ok(())
}
