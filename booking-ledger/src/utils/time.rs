//! 时间工具函数 - 业务时区与营业时段计算
//!
//! 订位只记录开始时间，结束时间一律由用餐时长推导。
//! 区间比较统一换算成 "当日零点起的分钟数"。

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid date format: {}", date),
            )
        })
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid time format: {}", time),
            )
        })
}

/// 解析星期 ("wed" / "Wednesday")，失败返回 None
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}

/// 当前时间 (业务时区)
pub fn local_now(now: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    now.with_timezone(&tz)
}

/// 丢弃秒与纳秒，订位时间只精确到分钟
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// 当日零点起的分钟数
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// 用餐区间 [start, start + duration)，单位为分钟
///
/// 结束点可能超过 1440 (跨午夜)，同一日期内比较仍然成立。
pub fn dining_interval(start: NaiveTime, duration_minutes: i64) -> (i64, i64) {
    let start = minute_of_day(start);
    (start, start + duration_minutes)
}

/// 半开区间相交判断，端点相接不算冲突
pub fn intervals_overlap(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// 时间加分钟，按挂钟方式跨午夜回绕 (23:00 + 90 → 00:30)
pub fn add_minutes_wrapping(time: NaiveTime, minutes: i64) -> NaiveTime {
    time.overflowing_add_signed(Duration::minutes(minutes)).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-06-12").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        assert!(parse_date("2025/06/12").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("18:00").unwrap(), t(18, 0));
        assert_eq!(parse_time(" 09:05 ").unwrap(), t(9, 5));
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("6pm").is_err());
    }

    #[test]
    fn test_parse_errors_use_invalid_format() {
        let err = parse_date("12/06/2025").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.message, "Invalid date format: 12/06/2025");

        assert_eq!(parse_time("18h").unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("wed"), Some(Weekday::Wed));
        assert_eq!(parse_weekday("Wednesday"), Some(Weekday::Wed));
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn test_truncate_to_minute() {
        let time = NaiveTime::from_hms_milli_opt(18, 0, 42, 500).unwrap();
        assert_eq!(truncate_to_minute(time), t(18, 0));
    }

    #[test]
    fn test_dining_interval_crosses_midnight() {
        assert_eq!(dining_interval(t(18, 0), 90), (1080, 1170));
        assert_eq!(dining_interval(t(23, 0), 90), (1380, 1470));
    }

    #[test]
    fn test_intervals_overlap_half_open() {
        let existing = dining_interval(t(18, 0), 90);
        assert!(intervals_overlap(dining_interval(t(19, 0), 90), existing));
        assert!(intervals_overlap(dining_interval(t(16, 31), 90), existing));
        assert!(!intervals_overlap(dining_interval(t(19, 30), 90), existing));
        assert!(!intervals_overlap(dining_interval(t(16, 30), 90), existing));
    }

    #[test]
    fn test_add_minutes_wrapping() {
        assert_eq!(add_minutes_wrapping(t(18, 0), 90), t(19, 30));
        assert_eq!(add_minutes_wrapping(t(23, 0), 90), t(0, 30));
    }
}
