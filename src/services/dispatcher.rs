//! 请求分发服务
//!
//! 把 UpdateRequest 发送到远端更新接口。任何传输或服务错误都被转换成
//! 合成的失败结果，不会向上传播，也不会影响其他并发请求。

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::clients::NotableBackend;
use crate::error::ApiError;
use crate::models::{UpdateRequest, UpdateResult};

/// 执行单个请求，永不返回错误
pub async fn execute(backend: &dyn NotableBackend, request: UpdateRequest) -> UpdateResult {
    match backend.update_notables(&request).await {
        Ok(payload) => {
            debug!("✓ 更新完成 {:?}: {}", request.target_ids().as_slice(), payload);
            UpdateResult::completed(request.target_ids().clone(), payload)
        }
        Err(e) => {
            warn!(
                "❌ 更新失败 ({} 个目标): {}",
                request.target_ids().len(),
                e
            );
            UpdateResult::failed(request.target_ids().clone(), e.to_string())
        }
    }
}

/// 请求分发器
///
/// 所有并发任务共享同一个后端连接，用 Semaphore 限制同时进行的请求数。
pub struct Dispatcher {
    backend: Arc<dyn NotableBackend>,
    semaphore: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn NotableBackend>, max_concurrent: usize) -> Self {
        Self {
            backend,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// 批量模式：单个同步调用
    pub async fn dispatch_one(&self, request: UpdateRequest) -> UpdateResult {
        execute(self.backend.as_ref(), request).await
    }

    /// 逐条模式：全部并发提交，按完成顺序返回
    ///
    /// 等待所有任务结束后才返回；每个请求恰好对应一个结果。
    pub async fn dispatch_all(&self, requests: Vec<UpdateRequest>) -> Vec<UpdateResult> {
        let total = requests.len();
        let mut pending = FuturesUnordered::new();

        for request in requests {
            let target_ids = request.target_ids().clone();
            let backend = Arc::clone(&self.backend);
            let semaphore = Arc::clone(&self.semaphore);

            let handle = tokio::spawn(async move {
                // Semaphore 不会被关闭，acquire 只会成功
                let _permit = semaphore.acquire_owned().await.ok();
                execute(backend.as_ref(), request).await
            });
            pending.push(handle.map(move |joined| (target_ids, joined)));
        }

        let mut results = Vec::with_capacity(total);
        while let Some((target_ids, joined)) = pending.next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("任务执行失败 {:?}: {}", target_ids.as_slice(), e);
                    let message = ApiError::TaskFailed {
                        message: e.to_string(),
                    }
                    .to_string();
                    results.push(UpdateResult::failed(target_ids, message));
                }
            }
        }

        debug!("并发分发完成: {}/{}", results.len(), total);
        results
    }
}
