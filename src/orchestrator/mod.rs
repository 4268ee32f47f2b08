//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次调用的流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! edit_processor (处理 Vec<InputRecord>)
//!     ↓
//! services (能力层：resolve / classify / build / dispatch / aggregate)
//!     ↓
//! clients (基础设施：NotableBackend)
//! ```
//!
//! 编排层只做调度和统计，不做具体的校验判断。

pub mod edit_processor;

// 重新导出主要类型
pub use edit_processor::{EditPhase, NotableEditor};
