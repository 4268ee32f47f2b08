//! 结果汇总
//!
//! 批量模式输出唯一的结果记录（没有任何标识时为合成的失败记录）；
//! 逐条模式按完成顺序每个结果输出一条。
//! 构建阶段被跳过的记录不产生输出。

use serde_json::Value;

use crate::models::{RecordWarning, UpdateResult};

/// 一次调用的最终结果
#[derive(Debug, Clone, Default)]
pub struct EditOutcome {
    pub results: Vec<UpdateResult>,
    pub warnings: Vec<RecordWarning>,
}

impl EditOutcome {
    /// 输出记录，顺序与 results 一致
    pub fn records(&self) -> Vec<Value> {
        self.results.iter().map(UpdateResult::to_record).collect()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// 汇总分发结果
pub fn aggregate(results: Vec<UpdateResult>, warnings: Vec<RecordWarning>) -> EditOutcome {
    EditOutcome { results, warnings }
}
