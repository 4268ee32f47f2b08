//! 记录分类
//!
//! 只回答"输入中是否出现了逐条覆盖字段"，模式本身由调用方显式指定。

use crate::models::InputRecord;

/// 任一记录含有 `edit-` 前缀字段即返回 true（短路）
pub fn has_override_fields(records: &[InputRecord]) -> bool {
    records.iter().any(InputRecord::has_override_fields)
}
