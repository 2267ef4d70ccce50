//! 机器可读输出的属性测试

use chrono::{TimeZone, Utc};
use logga::sinks::format::{format_json, format_plain, Timestamp};
use logga::{LogData, LogLevel};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

proptest! {
    #[test]
    fn json_line_parses_back_to_the_record(
        tag in ".*",
        message in ".*",
        stack in proptest::option::of(".*"),
        level in any_level(),
        millis in 0i64..4_102_444_800_000,
    ) {
        let mut data = LogData::new(tag, level, message);
        data.stack = stack;
        let time = Utc.timestamp_millis_opt(millis).unwrap();

        let line = format_json(&data, Timestamp::new(time, false)).unwrap();
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('/') || line.contains("\\/"));

        let parsed: LogData = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(parsed, data);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(
            value["time"].as_str().unwrap(),
            time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        );
    }

    #[test]
    fn fast_time_is_epoch_millis(millis in 0i64..4_102_444_800_000) {
        let data = LogData::new("t", LogLevel::Info, "m");
        let time = Utc.timestamp_millis_opt(millis).unwrap();
        let line = format_json(&data, Timestamp::new(time, true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(value["time"].as_i64(), Some(millis));
    }

    #[test]
    fn plain_line_starts_with_label(tag in "[a-z:]{1,12}", level in any_level()) {
        let line = format_plain(&LogData::new(tag.clone(), level, "m"), false);
        let expected = format!("{} {} m", level.label(), tag);
        prop_assert_eq!(line, expected);
    }
}
