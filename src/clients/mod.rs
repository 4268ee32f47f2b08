//! 远端服务客户端
//!
//! `NotableBackend` 描述三个远端协作方：参考数据查询、紧急程度查询、更新接口。
//! 编排层只依赖这个 trait，测试时可注入内存实现。

pub mod notable_client;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;
use crate::models::{ReviewStatusEntry, UpdateRequest};

pub use notable_client::NotableClient;

/// 远端 notable 服务
///
/// 实现必须可以被多个并发请求共享。
#[async_trait]
pub trait NotableBackend: Send + Sync {
    /// 读取状态/处置参考数据
    async fn list_review_statuses(&self) -> AppResult<Vec<ReviewStatusEntry>>;

    /// 读取去重后的紧急程度标签
    async fn list_urgencies(&self) -> AppResult<Vec<String>>;

    /// 提交一个更新请求，返回远端的 JSON 结果
    async fn update_notables(&self, request: &UpdateRequest) -> AppResult<Value>;
}
