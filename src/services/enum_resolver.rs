//! 枚举值解析服务 - 业务能力层
//!
//! 只负责"读取当前有效的 status / urgency / disposition"能力

use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::NotableBackend;
use crate::error::{AppResult, UpstreamError};
use crate::models::EnumerationSet;

/// 枚举值解析服务
///
/// 职责：
/// - 每次调用开始时读取一次参考数据和紧急程度列表
/// - 任一查询失败即返回 UpstreamUnavailable
/// - 结果为空集时照常返回，后续校验会拒绝所有取值
pub struct EnumResolver {
    backend: Arc<dyn NotableBackend>,
}

impl EnumResolver {
    pub fn new(backend: Arc<dyn NotableBackend>) -> Self {
        Self { backend }
    }

    pub async fn resolve(&self) -> AppResult<EnumerationSet> {
        let entries = self
            .backend
            .list_review_statuses()
            .await
            .map_err(|e| UpstreamError::ReferenceStoreUnavailable {
                source: Box::new(e),
            })?;
        debug!("参考数据返回 {} 条记录", entries.len());

        let urgencies = self
            .backend
            .list_urgencies()
            .await
            .map_err(|e| UpstreamError::UrgencyLookupUnavailable {
                source: Box::new(e),
            })?;
        debug!("紧急程度查询返回 {} 个标签", urgencies.len());

        let set = EnumerationSet::from_sources(entries, urgencies);
        let (statuses, urgencies, dispositions) = set.counts();
        info!(
            "✓ 有效枚举值: status {} 个, urgency {} 个, disposition {} 个",
            statuses, urgencies, dispositions
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fake::FakeBackend;
    use crate::error::AppError;
    use crate::models::EnumField;

    #[tokio::test]
    async fn test_resolve_builds_all_three_sets() {
        let resolver = EnumResolver::new(Arc::new(FakeBackend::new()));
        let set = resolver.resolve().await.unwrap();

        assert_eq!(set.lookup_status("in progress"), Some("2"));
        assert_eq!(set.lookup_urgency("Critical"), Some("critical"));
        assert_eq!(
            set.lookup_disposition("false positive").map(|d| d.code.as_str()),
            Some("disposition:2")
        );
        assert_eq!(set.valid_labels(EnumField::Urgency).len(), 5);
    }

    #[tokio::test]
    async fn test_reference_store_failure_is_upstream_unavailable() {
        let resolver = EnumResolver::new(Arc::new(FakeBackend::new().failing_reference_store()));
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Upstream(UpstreamError::ReferenceStoreUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_urgency_failure_is_upstream_unavailable() {
        let resolver = EnumResolver::new(Arc::new(FakeBackend::new().failing_urgency_lookup()));
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Upstream(UpstreamError::UrgencyLookupUnavailable { .. })
        ));
    }
}
