//! 更新结果与逐条警告

use serde_json::{json, Value};
use std::fmt;

use crate::models::request::TargetIds;

/// 单个请求的结果
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// 远端返回的原始结果
    Completed(Value),
    /// 传输或服务错误时合成的失败结果
    Failed { message: String, warnings: Vec<String> },
}

/// 一个 UpdateRequest 对应的唯一结果
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    target_ids: TargetIds,
    outcome: UpdateOutcome,
}

impl UpdateResult {
    pub fn completed(target_ids: TargetIds, payload: Value) -> Self {
        Self {
            target_ids,
            outcome: UpdateOutcome::Completed(payload),
        }
    }

    pub fn failed(target_ids: TargetIds, message: impl Into<String>) -> Self {
        Self {
            target_ids,
            outcome: UpdateOutcome::Failed {
                message: message.into(),
                warnings: Vec::new(),
            },
        }
    }

    pub fn target_ids(&self) -> &TargetIds {
        &self.target_ids
    }

    /// 远端结果中没有 `success` 字段时视为成功
    pub fn is_success(&self) -> bool {
        match &self.outcome {
            UpdateOutcome::Completed(payload) => payload
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            UpdateOutcome::Failed { .. } => false,
        }
    }

    /// 转为输出记录
    pub fn to_record(&self) -> Value {
        match &self.outcome {
            UpdateOutcome::Completed(payload) => payload.clone(),
            UpdateOutcome::Failed { message, warnings } => json!({
                "success": false,
                "successCount": 0,
                "failureCount": self.target_ids.len(),
                "message": message,
                "warnings": warnings,
            }),
        }
    }
}

/// 不中止调用的逐条警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordWarning {
    /// 记录既没有 event_id 也没有 rule_id，已跳过
    UnidentifiableRecord { index: usize },
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordWarning::UnidentifiableRecord { index } => write!(
                f,
                "第 {} 条记录缺少 event_id 和 rule_id，已跳过",
                index + 1
            ),
        }
    }
}
