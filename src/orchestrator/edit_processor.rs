//! 编辑处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次调用的完整生命周期。
//!
//! ## 核心流程
//!
//! ```text
//! Idle → ResolvingEnums → BuildingBulk | BuildingPerRecord → Dispatching → Aggregating → Done
//! ```
//!
//! 任何校验错误直接进入 `Failed`，不会发出任何更新请求；
//! 分发阶段的传输错误只体现为失败结果，流程照常到达 `Done`。

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::clients::{NotableBackend, NotableClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{EditMode, EditOptions, InputRecord, TargetIds, UpdateResult};
use crate::services::{aggregate, Dispatcher, EditOutcome, EnumResolver, RequestBuilder};
use crate::utils::logging;

/// 调用所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    ResolvingEnums,
    BuildingBulk,
    BuildingPerRecord,
    Dispatching,
    Aggregating,
    Done,
    Failed,
}

impl fmt::Display for EditPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 应用主结构
pub struct NotableEditor {
    config: Config,
    backend: Arc<dyn NotableBackend>,
    dispatcher: Dispatcher,
}

impl NotableEditor {
    /// 初始化应用，使用 HTTP 客户端连接远端
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let backend: Arc<dyn NotableBackend> = Arc::new(NotableClient::new(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    /// 使用指定的后端初始化
    pub fn with_backend(config: Config, backend: Arc<dyn NotableBackend>) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&backend), config.max_concurrent_requests);
        Self {
            config,
            backend,
            dispatcher,
        }
    }

    /// 运行一次完整的编辑
    pub async fn run(
        &self,
        options: &EditOptions,
        records: Vec<InputRecord>,
    ) -> AppResult<EditOutcome> {
        transition(EditPhase::Idle);
        logging::log_startup(&self.config, options.mode, records.len());

        match self.run_phases(options, records).await {
            Ok(outcome) => {
                transition(EditPhase::Done);
                logging::print_final_stats(&outcome);
                Ok(outcome)
            }
            Err(e) => {
                transition(EditPhase::Failed);
                error!("❌ 编辑中止: {}", e);
                Err(e)
            }
        }
    }

    async fn run_phases(
        &self,
        options: &EditOptions,
        records: Vec<InputRecord>,
    ) -> AppResult<EditOutcome> {
        transition(EditPhase::ResolvingEnums);
        let enums = EnumResolver::new(Arc::clone(&self.backend)).resolve().await?;

        let builder = RequestBuilder::new(&enums);
        let global = options.global_fields();
        let built = match options.mode {
            EditMode::Batch => {
                transition(EditPhase::BuildingBulk);
                builder.build_bulk(&global, &records)?
            }
            EditMode::Single => {
                transition(EditPhase::BuildingPerRecord);
                builder.build_per_record(&global, &records)?
            }
        };

        for warning in &built.warnings {
            info!("⚠️ {}", warning);
        }

        transition(EditPhase::Dispatching);
        info!("📤 发送 {} 个更新请求", built.requests.len());
        let results = match options.mode {
            EditMode::Batch => match built.requests.into_iter().next() {
                Some(request) => vec![self.dispatcher.dispatch_one(request).await],
                // 批量模式始终只有一条输出记录
                None => vec![UpdateResult::failed(
                    TargetIds::Many(Vec::new()),
                    "输入中没有任何带 event_id 或 rule_id 的记录，未发送更新请求",
                )],
            },
            EditMode::Single => self.dispatcher.dispatch_all(built.requests).await,
        };

        transition(EditPhase::Aggregating);
        Ok(aggregate(results, built.warnings))
    }
}

fn transition(phase: EditPhase) {
    debug!("→ {}", phase);
}
