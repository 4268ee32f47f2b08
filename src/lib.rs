//! # Notable Editor
//!
//! 批量编辑 notable 事件（状态、紧急程度、负责人、备注、处置）的 Rust 库
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有远端连接，只暴露能力
//! - `NotableBackend` - 参考数据查询、紧急程度查询、更新接口
//! - `NotableClient` - 基于 reqwest 的实现
//!
//! ### ② 数据模型（Models）
//! - `InputRecord` / `EnumerationSet` / `UpdateRequest` / `UpdateResult`
//!
//! ### ③ 业务能力层（Services）
//! - `EnumResolver` - 读取当前有效的枚举值
//! - `record_classifier` - 判断输入中是否有 edit-* 字段
//! - `RequestBuilder` - 批量 / 逐条两种请求构建
//! - `Dispatcher` - 串行或并发发送，失败转为结果
//! - `result_aggregator` - 汇总输出记录
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/edit_processor` - 一次调用的完整流程
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{NotableBackend, NotableClient};
pub use config::Config;
pub use error::{AppError, AppResult, EditError};
pub use models::{EditMode, EditOptions, EnumerationSet, InputRecord, UpdateRequest, UpdateResult};
pub use orchestrator::NotableEditor;
pub use services::EditOutcome;
