//! 请求构建服务 - 业务能力层
//!
//! 把全局参数或每条记录的 edit-* 字段转换成 UpdateRequest，
//! 所有枚举值都对照本次调用解析出的 EnumerationSet 校验。
//!
//! 两级错误：
//! - `EditError`：任何非法取值或参数冲突，整个调用立即中止
//! - `RecordWarning`：记录无法识别，只跳过该记录

use phf::phf_map;
use tracing::{debug, warn};

use crate::error::EditError;
use crate::models::{
    EditField, EditFields, EnumField, EnumerationSet, InputRecord, RecordWarning, TargetIds,
    UpdateRequest,
};
use crate::services::record_classifier;

/// 逐条覆盖字段 → 可编辑字段
static OVERRIDE_FIELDS: phf::Map<&'static str, EditField> = phf_map! {
    "edit-comment" => EditField::Comment,
    "edit-status" => EditField::Status,
    "edit-urgency" => EditField::Urgency,
    "edit-owner" => EditField::NewOwner,
    "edit-disposition" => EditField::Disposition,
};

/// 构建结果
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub requests: Vec<UpdateRequest>,
    pub warnings: Vec<RecordWarning>,
}

/// 请求构建器
pub struct RequestBuilder<'a> {
    enums: &'a EnumerationSet,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(enums: &'a EnumerationSet) -> Self {
        Self { enums }
    }

    /// 批量模式：一个请求覆盖所有记录
    ///
    /// 目标为所有记录 `event_id` 与 `rule_id` 的去重并集，多值字段的每个值都计入。
    /// 没有任何标识时不构建请求。
    pub fn build_bulk(
        &self,
        options: &EditFields,
        records: &[InputRecord],
    ) -> Result<BuildOutput, EditError> {
        if record_classifier::has_override_fields(records) {
            return Err(EditError::ConflictingOptions {
                reason: "批量模式下不能混用全局参数和 edit-* 逐条字段".to_string(),
            });
        }

        let fields = self.validate(options)?;
        if fields.is_empty() {
            return Err(EditError::NoEditsRequested);
        }

        let mut output = BuildOutput::default();
        let mut ids = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let identifiers = record.identifiers();
            if identifiers.is_empty() {
                warn!("⚠️ 第 {} 条记录缺少 event_id 和 rule_id", index + 1);
                output
                    .warnings
                    .push(RecordWarning::UnidentifiableRecord { index });
                continue;
            }
            ids.extend(identifiers);
        }

        let target_ids = TargetIds::many(ids);
        if target_ids.is_empty() {
            warn!("⚠️ 输入中没有任何 notable 标识，不发送请求");
            return Ok(output);
        }

        debug!("批量请求: {} 个目标, 字段 {:?}", target_ids.len(), fields);
        output.requests.extend(UpdateRequest::new(fields, target_ids));
        Ok(output)
    }

    /// 逐条模式：每条记录根据自己的 edit-* 字段最多生成一个请求
    pub fn build_per_record(
        &self,
        options: &EditFields,
        records: &[InputRecord],
    ) -> Result<BuildOutput, EditError> {
        if !options.is_empty() {
            return Err(EditError::ConflictingOptions {
                reason: "逐条模式下不能提供 comment、status、urgency、newOwner、disposition 参数"
                    .to_string(),
            });
        }

        let mut output = BuildOutput::default();
        for (index, record) in records.iter().enumerate() {
            let fields = self.validate(&extract_overrides(record))?;
            if fields.is_empty() {
                continue;
            }

            let Some(target) = record.event_id().or_else(|| record.rule_id()) else {
                warn!("⚠️ 第 {} 条记录缺少 event_id 和 rule_id，已跳过", index + 1);
                output
                    .warnings
                    .push(RecordWarning::UnidentifiableRecord { index });
                continue;
            };

            output
                .requests
                .extend(UpdateRequest::new(fields, TargetIds::Single(target)));
        }

        debug!(
            "逐条模式: {} 条记录生成 {} 个请求",
            records.len(),
            output.requests.len()
        );
        Ok(output)
    }

    /// 校验枚举字段并替换为远端使用的值，comment/newOwner 原样保留
    fn validate(&self, raw: &EditFields) -> Result<EditFields, EditError> {
        let mut fields = EditFields {
            comment: raw.comment.clone(),
            new_owner: raw.new_owner.clone(),
            ..EditFields::default()
        };
        if let Some(status) = &raw.status {
            fields.status = Some(self.enums.resolve(EnumField::Status, status)?);
        }
        if let Some(urgency) = &raw.urgency {
            fields.urgency = Some(self.enums.resolve(EnumField::Urgency, urgency)?);
        }
        if let Some(disposition) = &raw.disposition {
            fields.disposition = Some(self.enums.resolve(EnumField::Disposition, disposition)?);
        }
        Ok(fields)
    }
}

/// 读取一条记录中的 edit-* 字段
fn extract_overrides(record: &InputRecord) -> EditFields {
    let mut fields = EditFields::default();
    for (name, field) in OVERRIDE_FIELDS.entries() {
        if let Some(value) = record.text(name) {
            fields.set(*field, value);
        }
    }
    fields
}
