//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`Clock`] - 可注入时钟
//! - 时间、日志、文本校验等工具

pub mod clock;
pub mod logger;
pub mod time;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
