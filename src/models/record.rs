use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// notable 的主标识字段
pub const EVENT_ID: &str = "event_id";
/// notable 的备用标识字段
pub const RULE_ID: &str = "rule_id";
/// 逐条覆盖字段的固定前缀
pub const OVERRIDE_PREFIX: &str = "edit-";

/// 输入记录：字段名 → 值
///
/// 由外部搜索管道送入，至少包含 `event_id` 或 `rule_id` 之一才可被编辑。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord {
    fields: Map<String, Value>,
}

impl InputRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// 从字符串键值对构建（主要用于测试和简单输入）
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { fields }
    }

    /// 以文本形式读取字段
    ///
    /// 空字符串视为未提供；数字和布尔值转为文本；多值字段取第一个非空值。
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(value_as_text)
    }

    /// 以文本列表形式读取字段，多值字段展开为全部非空值
    pub fn texts(&self, name: &str) -> Vec<String> {
        match self.fields.get(name) {
            Some(Value::Array(items)) => items.iter().filter_map(value_as_text).collect(),
            Some(value) => value_as_text(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// 记录携带的全部标识：`event_id` 的所有值在前，`rule_id` 在后
    pub fn identifiers(&self) -> Vec<String> {
        [EVENT_ID, RULE_ID]
            .iter()
            .flat_map(|name| self.texts(name))
            .map(|s| s.trim().to_string())
            .collect()
    }

    pub fn event_id(&self) -> Option<String> {
        self.text(EVENT_ID).map(|s| s.trim().to_string())
    }

    pub fn rule_id(&self) -> Option<String> {
        self.text(RULE_ID).map(|s| s.trim().to_string())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// 是否带有 `edit-` 前缀的覆盖字段
    pub fn has_override_fields(&self) -> bool {
        self.field_names().any(|name| name.starts_with(OVERRIDE_PREFIX))
    }
}

impl From<Map<String, Value>> for InputRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => return items.iter().find_map(value_as_text),
        Value::Null | Value::Object(_) => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
