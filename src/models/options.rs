use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::request::{EditField, EditFields};

/// 编辑模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// 批量：所有记录统一编辑，一个请求
    #[default]
    Batch,
    /// 逐条：根据每条记录的 edit-* 字段分别编辑
    Single,
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batch" => Ok(EditMode::Batch),
            "single" => Ok(EditMode::Single),
            other => Err(format!("未知的模式 '{}'，可选值为 batch 或 single", other)),
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Batch => f.write_str("batch"),
            EditMode::Single => f.write_str("single"),
        }
    }
}

/// 一次调用的参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    pub mode: EditMode,
    pub comment: Option<String>,
    pub status: Option<String>,
    pub urgency: Option<String>,
    pub new_owner: Option<String>,
    pub disposition: Option<String>,
}

impl EditOptions {
    pub fn batch() -> Self {
        Self::default()
    }

    pub fn single() -> Self {
        Self {
            mode: EditMode::Single,
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, value: impl Into<String>) -> Self {
        self.comment = Some(value.into());
        self
    }

    pub fn with_status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn with_urgency(mut self, value: impl Into<String>) -> Self {
        self.urgency = Some(value.into());
        self
    }

    pub fn with_new_owner(mut self, value: impl Into<String>) -> Self {
        self.new_owner = Some(value.into());
        self
    }

    pub fn with_disposition(mut self, value: impl Into<String>) -> Self {
        self.disposition = Some(value.into());
        self
    }

    /// 全局编辑参数（未校验），空白值视为未提供
    pub fn global_fields(&self) -> EditFields {
        let mut fields = EditFields::default();
        let supplied = [
            (EditField::Comment, &self.comment),
            (EditField::Status, &self.status),
            (EditField::Urgency, &self.urgency),
            (EditField::NewOwner, &self.new_owner),
            (EditField::Disposition, &self.disposition),
        ];
        for (field, value) in supplied {
            if let Some(v) = value {
                fields.set(field, v.as_str());
            }
        }
        fields
    }
}
