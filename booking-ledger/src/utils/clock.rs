//! 时钟抽象
//!
//! "今天" 与 "现在" 都经由 [`Clock`] 读取，测试中用 [`FixedClock`] 固定时间。

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// Source of the current instant
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freeze at a local date and time of the business timezone
    ///
    /// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
    pub fn at_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Self {
        let naive = date.and_time(time);
        let instant = naive
            .and_local_timezone(tz)
            .latest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc());
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
