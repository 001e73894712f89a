//! 日期辅助模块
//!
//! 线上协议里的日期一律是 `YYYY-MM-DD` 字符串，这里集中
//! 今天 / 偏移 / 解析的小工具，wasm 与原生环境行为一致。

use chrono::{Datelike, Duration, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 当天日期（UTC）
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 当天日期的 ISO 字符串形式
pub fn today_string() -> String {
    format_date(today())
}

/// 距今天 `days` 天的日期字符串（负数表示过去）
pub fn offset_from_today(days: i64) -> String {
    format_date(today() + Duration::days(days))
}

/// 在一个 ISO 日期字符串上加 `days` 天，解析失败返回 None
pub fn plus_days(date: &str, days: i64) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    Some(format_date(parsed + Duration::days(days)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 当前 Unix 毫秒时间戳
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 当前年份，页脚版权标注用
pub fn current_year() -> i32 {
    today().year()
}
