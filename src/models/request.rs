use serde::Serialize;
use std::collections::HashSet;

/// 请求的目标标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TargetIds {
    /// 逐条模式：单个标识
    Single(String),
    /// 批量模式：去重后的标识集合（保持首次出现的顺序）
    Many(Vec<String>),
}

impl TargetIds {
    /// 去重构建，保留首次出现的顺序
    pub fn many(ids: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let unique = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        TargetIds::Many(unique)
    }

    pub fn len(&self) -> usize {
        match self {
            TargetIds::Single(_) => 1,
            TargetIds::Many(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            TargetIds::Single(id) => std::slice::from_ref(id),
            TargetIds::Many(ids) => ids,
        }
    }
}

/// 可编辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Comment,
    Status,
    Urgency,
    NewOwner,
    Disposition,
}

impl EditField {
    /// 远端更新接口使用的参数名
    pub fn param_name(self) -> &'static str {
        match self {
            EditField::Comment => "comment",
            EditField::Status => "status",
            EditField::Urgency => "urgency",
            EditField::NewOwner => "newOwner",
            EditField::Disposition => "disposition",
        }
    }
}

/// 一组编辑值，未设置的字段为 None
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
}

impl EditFields {
    /// 设置字段，空白值被忽略
    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        let slot = match field {
            EditField::Comment => &mut self.comment,
            EditField::Status => &mut self.status,
            EditField::Urgency => &mut self.urgency,
            EditField::NewOwner => &mut self.new_owner,
            EditField::Disposition => &mut self.disposition,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// 按固定顺序列出已设置的字段
    pub fn entries(&self) -> impl Iterator<Item = (EditField, &str)> {
        [
            (EditField::Comment, &self.comment),
            (EditField::Status, &self.status),
            (EditField::Urgency, &self.urgency),
            (EditField::NewOwner, &self.new_owner),
            (EditField::Disposition, &self.disposition),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

/// 发往更新接口的一个请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(flatten)]
    fields: EditFields,
    target_ids: TargetIds,
}

impl UpdateRequest {
    /// 没有任何可编辑字段时不构建请求
    pub fn new(fields: EditFields, target_ids: TargetIds) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        Some(Self { fields, target_ids })
    }

    pub fn fields(&self) -> &EditFields {
        &self.fields
    }

    pub fn target_ids(&self) -> &TargetIds {
        &self.target_ids
    }
}
