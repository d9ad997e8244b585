//! Booking Ledger - 餐厅桌位订位台账
//!
//! # 架构概述
//!
//! 单进程、内存中的订位管理核心，呈现层作为外部调用方：
//!
//! - **桌位目录** (`catalog`): 固定的桌位与容量
//! - **订位存储** (`ledger::BookingStore`): 所有订位及其状态
//! - **可用性引擎** (`availability`): 冲突检测、下一个可用时段、容量提示
//! - **校验流水线** (`ledger::ValidationPipeline`): 新增/编辑前的顺序检查
//!
//! # 模块结构
//!
//! ```text
//! booking-ledger/src/
//! ├── catalog.rs       # 桌位目录
//! ├── availability.rs  # 可用性引擎
//! ├── config.rs        # 配置 (环境变量)
//! ├── ledger/          # ReservationLedger、存储、校验、错误
//! └── utils/           # 时钟、时间、文本校验、日志
//! ```

pub mod availability;
pub mod catalog;
pub mod config;
pub mod ledger;
pub mod utils;

// Re-export 公共类型
pub use availability::{Availability, Conflict};
pub use catalog::{CatalogError, TableCatalog};
pub use config::LedgerConfig;
pub use ledger::{BookingError, BookingResult, ReservationLedger};
pub use utils::{AppError, AppResult, Clock, ErrorCategory, ErrorCode, FixedClock, SystemClock};

// Re-export 表单输入解析
pub use utils::time::{parse_date, parse_time};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_from_config, init_logger_with_file};
