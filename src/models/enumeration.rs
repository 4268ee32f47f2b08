//! 状态、紧急程度、处置的有效取值集合
//!
//! 每次调用开始时从远端参考数据解析一次，之后只读。
//! 所有查找都不区分大小写。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::error::EditError;

/// reviewstatuses 集合中的一条记录
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewStatusEntry {
    #[serde(default)]
    pub label: String,
    /// 状态码或处置码，远端可能返回数字或字符串
    #[serde(default, deserialize_with = "deserialize_code")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub disabled: bool,
    #[serde(default)]
    pub status_type: String,
    /// 其余字段原样保留，作为处置的元数据
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 状态类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Notable,
    Disposition,
}

impl ReviewStatusEntry {
    pub fn status_type(&self) -> Option<StatusType> {
        match self.status_type.trim().to_ascii_lowercase().as_str() {
            "notable" => Some(StatusType::Notable),
            "disposition" => Some(StatusType::Disposition),
            _ => None,
        }
    }
}

/// 处置记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispositionRecord {
    pub code: String,
    pub label: String,
    pub metadata: Map<String, Value>,
}

/// 需要校验的枚举字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumField {
    Status,
    Urgency,
    Disposition,
}

impl EnumField {
    pub fn name(self) -> &'static str {
        match self {
            EnumField::Status => "status",
            EnumField::Urgency => "urgency",
            EnumField::Disposition => "disposition",
        }
    }
}

impl fmt::Display for EnumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一次调用内的有效枚举值集合
#[derive(Debug, Clone, Default)]
pub struct EnumerationSet {
    status_by_label: HashMap<String, String>,
    /// 小写 → 远端原始写法
    urgency_labels: HashMap<String, String>,
    disposition_by_label: HashMap<String, DispositionRecord>,
}

impl EnumerationSet {
    /// 由远端返回的原始数据构建，禁用项和未知类型被排除
    pub fn from_sources(entries: Vec<ReviewStatusEntry>, urgencies: Vec<String>) -> Self {
        let mut set = Self::default();

        for entry in entries {
            let label = entry.label.trim().to_lowercase();
            if entry.disabled || label.is_empty() {
                continue;
            }
            match entry.status_type() {
                Some(StatusType::Notable) => {
                    set.status_by_label.insert(label, entry.status);
                }
                Some(StatusType::Disposition) => {
                    set.disposition_by_label.insert(
                        label,
                        DispositionRecord {
                            code: entry.status,
                            label: entry.label.trim().to_string(),
                            metadata: entry.extra,
                        },
                    );
                }
                None => {}
            }
        }

        for urgency in urgencies {
            let trimmed = urgency.trim();
            if !trimmed.is_empty() {
                set.urgency_labels
                    .entry(trimmed.to_lowercase())
                    .or_insert_with(|| trimmed.to_string());
            }
        }

        set
    }

    pub fn with_status(mut self, label: &str, code: &str) -> Self {
        self.status_by_label
            .insert(label.to_lowercase(), code.to_string());
        self
    }

    pub fn with_urgency(mut self, label: &str) -> Self {
        self.urgency_labels
            .insert(label.to_lowercase(), label.to_string());
        self
    }

    pub fn with_disposition(mut self, label: &str, code: &str) -> Self {
        self.disposition_by_label.insert(
            label.to_lowercase(),
            DispositionRecord {
                code: code.to_string(),
                label: label.to_string(),
                metadata: Map::new(),
            },
        );
        self
    }

    pub fn lookup_status(&self, label: &str) -> Option<&str> {
        self.status_by_label
            .get(&label.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn lookup_urgency(&self, label: &str) -> Option<&str> {
        self.urgency_labels
            .get(&label.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn lookup_disposition(&self, label: &str) -> Option<&DispositionRecord> {
        self.disposition_by_label.get(&label.trim().to_lowercase())
    }

    /// 将用户提供的标签解析为发送给远端的值
    ///
    /// status/disposition 返回对应的码，urgency 返回远端的标签写法。
    pub fn resolve(&self, field: EnumField, value: &str) -> Result<String, EditError> {
        let resolved = match field {
            EnumField::Status => self.lookup_status(value).map(str::to_string),
            EnumField::Urgency => self.lookup_urgency(value).map(str::to_string),
            EnumField::Disposition => self.lookup_disposition(value).map(|d| d.code.clone()),
        };
        resolved.ok_or_else(|| EditError::InvalidEnumValue {
            field: field.name(),
            value: value.to_string(),
            valid: self.valid_labels(field),
        })
    }

    /// 某个字段的全部有效标签（小写，已排序）
    pub fn valid_labels(&self, field: EnumField) -> Vec<String> {
        let mut labels: Vec<String> = match field {
            EnumField::Status => self.status_by_label.keys().cloned().collect(),
            EnumField::Urgency => self.urgency_labels.keys().cloned().collect(),
            EnumField::Disposition => self.disposition_by_label.keys().cloned().collect(),
        };
        labels.sort();
        labels
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.status_by_label.len(),
            self.urgency_labels.len(),
            self.disposition_by_label.len(),
        )
    }
}

// 码值可能是字符串或整数
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;

    struct CodeVisitor;

    impl<'de> Visitor<'de> for CodeVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer status code")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(CodeVisitor)
}

// 禁用标记可能是 bool、0/1 或 "0"/"1"/"true"/"false"
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true"),
        _ => false,
    })
}
