use chrono::Weekday;
use chrono_tz::Tz;

use crate::utils::time::parse_weekday;

/// 訂位台账配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | BOOKING_TIMEZONE | Asia/Taipei | 业务时区 ("今天"/"现在" 的判定) |
/// | DINING_DURATION_MINUTES | 90 | 每组客人的用餐时长 |
/// | CLOSED_WEEKDAY | wed | 每周公休日 (店规为周三，仅供测试覆盖) |
/// | OVER_CAPACITY_SLACK | 2 | 桌位容量超出人数多少时提示浪费 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 文件日志目录 |
///
/// 非法值回退到默认值并记录 warn 日志。
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// 业务时区
    pub timezone: Tz,
    /// 用餐时长 (分钟)
    pub dining_minutes: i64,
    /// 公休日，当天一律不接受订位
    ///
    /// 店规为每周三公休；覆盖仅供测试使用。
    pub closed_weekday: Weekday,
    /// 容量超出人数的容忍值
    pub over_capacity_slack: u32,
    /// 多桌合并显示名称的分隔符
    pub table_name_separator: String,
    /// 日志级别
    pub log_level: String,
    /// 文件日志目录
    pub log_dir: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Taipei,
            dining_minutes: 90,
            closed_weekday: Weekday::Wed,
            over_capacity_slack: 2,
            table_name_separator: " + ".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LedgerConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置，未设置或非法的项使用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let timezone = match lookup("BOOKING_TIMEZONE") {
            Some(value) => value.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Invalid BOOKING_TIMEZONE, using default");
                defaults.timezone
            }),
            None => defaults.timezone,
        };

        let dining_minutes = match lookup("DINING_DURATION_MINUTES") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(minutes) if (1..24 * 60).contains(&minutes) => minutes,
                _ => {
                    tracing::warn!(value = %value, "Invalid DINING_DURATION_MINUTES, using default");
                    defaults.dining_minutes
                }
            },
            None => defaults.dining_minutes,
        };

        let closed_weekday = match lookup("CLOSED_WEEKDAY") {
            Some(value) => parse_weekday(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Invalid CLOSED_WEEKDAY, using default");
                defaults.closed_weekday
            }),
            None => defaults.closed_weekday,
        };

        let over_capacity_slack = match lookup("OVER_CAPACITY_SLACK") {
            Some(value) => value.trim().parse::<u32>().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Invalid OVER_CAPACITY_SLACK, using default");
                defaults.over_capacity_slack
            }),
            None => defaults.over_capacity_slack,
        };

        Self {
            timezone,
            dining_minutes,
            closed_weekday,
            over_capacity_slack,
            table_name_separator: defaults.table_name_separator,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }
}
