//! 日志行格式化
//!
//! - 机器可读：单行 JSON，键顺序为 `time, tag, level, message[, stack]`
//! - 人类可读：`<emoji> <彩色级别标签> <青色标签> <消息>`
//! - 无装饰：`LABEL tag message`

use crate::core::event::LogData;
use crate::core::level::LogLevel;
use crate::error::{LoggaError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

const EMOJI: [&str; 4] = [
    "\u{1F6A8}", // error
    "\u{26A0}",  // warn
    "\u{1F6C8}", // info
    "\u{1F41B}", // debug
];

const COLOUR: [&str; 4] = [
    "\x1b[31;1m", // red
    "\x1b[33;1m", // yellow
    "\x1b[34;1m", // blue
    "\x1b[30;1m", // grey (bright black)
];

const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// 机器可读输出中的时间字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// ISO-8601 字符串，UTC，毫秒精度
    Iso(String),
    /// Unix 纪元毫秒
    EpochMillis(i64),
}

impl Timestamp {
    pub fn new(time: DateTime<Utc>, fast: bool) -> Self {
        if fast {
            Timestamp::EpochMillis(time.timestamp_millis())
        } else {
            Timestamp::Iso(time.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
    }
}

#[derive(Serialize)]
struct MachineLine<'a> {
    time: Timestamp,
    tag: &'a str,
    level: LogLevel,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a str>,
}

/// 在 serde_json 默认转义之外额外把 `/` 转义为 `\/`
#[derive(Debug, Clone, Copy, Default)]
struct SolidusEscaping;

impl Formatter for SolidusEscaping {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut rest = fragment;
        while let Some(pos) = rest.find('/') {
            writer.write_all(rest[..pos].as_bytes())?;
            writer.write_all(b"\\/")?;
            rest = &rest[pos + 1..];
        }
        writer.write_all(rest.as_bytes())
    }
}

/// 渲染单行 JSON（不含结尾换行）
pub fn format_json(data: &LogData, time: Timestamp) -> Result<String> {
    let line = MachineLine {
        time,
        tag: &data.tag,
        level: data.level,
        message: &data.message,
        stack: data.stack.as_deref(),
    };
    let mut buf = Vec::with_capacity(64 + data.message.len());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SolidusEscaping);
    line.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| LoggaError::sink(e.to_string()))
}

fn append_stack(mut entry: String, data: &LogData, show_stack: bool) -> String {
    if show_stack {
        if let Some(stack) = &data.stack {
            entry.push_str("\n  ");
            entry.push_str(stack);
        }
    }
    entry
}

/// 渲染带 emoji 和 ANSI 颜色的人类可读行
pub fn format_pretty(data: &LogData, show_stack: bool) -> String {
    let index = data.level.index();
    let entry = format!(
        "{} {}{}{} {}{}{} {}",
        EMOJI[index],
        COLOUR[index],
        data.level.label(),
        RESET,
        CYAN,
        data.tag,
        RESET,
        data.message
    );
    append_stack(entry, data, show_stack)
}

/// 渲染无装饰的 `LABEL tag message` 行
pub fn format_plain(data: &LogData, show_stack: bool) -> String {
    let entry = format!("{} {} {}", data.level.label(), data.tag, data.message);
    append_stack(entry, data, show_stack)
}
