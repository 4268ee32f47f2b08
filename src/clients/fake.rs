//! 测试用的内存后端

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

use crate::clients::NotableBackend;
use crate::error::{AppError, AppResult};
use crate::models::{ReviewStatusEntry, UpdateRequest};

pub(crate) struct FakeBackend {
    statuses: Vec<Value>,
    urgencies: Vec<String>,
    fail_reference_store: bool,
    fail_urgency_lookup: bool,
    /// 目标中包含这些标识的请求返回传输错误
    failing_ids: HashSet<String>,
    /// 目标中包含这些标识的请求要等到另一个请求完成后才返回
    held_ids: HashSet<String>,
    release: Notify,
    updates: Mutex<Vec<UpdateRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            statuses: vec![
                json!({"label": "New", "status": 1, "disabled": 0, "status_type": "notable"}),
                json!({"label": "In Progress", "status": 2, "disabled": 0, "status_type": "notable"}),
                json!({"label": "Pending", "status": 3, "disabled": 0, "status_type": "notable"}),
                json!({"label": "Resolved", "status": 4, "disabled": 0, "status_type": "notable"}),
                json!({"label": "Closed", "status": 5, "disabled": 0, "status_type": "notable"}),
                json!({"label": "True Positive", "status": "disposition:1", "disabled": 0, "status_type": "disposition"}),
                json!({"label": "False Positive", "status": "disposition:2", "disabled": 0, "status_type": "disposition"}),
            ],
            urgencies: ["critical", "high", "medium", "low", "informational"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fail_reference_store: false,
            fail_urgency_lookup: false,
            failing_ids: HashSet::new(),
            held_ids: HashSet::new(),
            release: Notify::new(),
            updates: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing_reference_store(mut self) -> Self {
        self.fail_reference_store = true;
        self
    }

    pub(crate) fn failing_urgency_lookup(mut self) -> Self {
        self.fail_urgency_lookup = true;
        self
    }

    pub(crate) fn failing_for(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    pub(crate) fn held_for(mut self, id: &str) -> Self {
        self.held_ids.insert(id.to_string());
        self
    }

    pub(crate) fn updates(&self) -> Vec<UpdateRequest> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotableBackend for FakeBackend {
    async fn list_review_statuses(&self) -> AppResult<Vec<ReviewStatusEntry>> {
        if self.fail_reference_store {
            return Err(AppError::api_bad_response("reviewstatuses", 503, "unavailable"));
        }
        Ok(serde_json::from_value(Value::Array(self.statuses.clone()))?)
    }

    async fn list_urgencies(&self) -> AppResult<Vec<String>> {
        if self.fail_urgency_lookup {
            return Err(AppError::api_bad_response("search/jobs", 500, "search failed"));
        }
        Ok(self.urgencies.clone())
    }

    async fn update_notables(&self, request: &UpdateRequest) -> AppResult<Value> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        self.updates.lock().unwrap().push(request.clone());

        let ids = request.target_ids().as_slice();
        let held = ids.iter().any(|id| self.held_ids.contains(id));
        if held {
            self.release.notified().await;
        } else {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if !held {
            // notify_one 会保留许可，先完成的请求不会丢失唤醒
            self.release.notify_one();
        }

        if ids.iter().any(|id| self.failing_ids.contains(id)) {
            return Err(AppError::api_bad_response("notable_update", 500, "internal error"));
        }
        Ok(json!({
            "success": true,
            "success_count": ids.len(),
            "failure_count": 0,
            "message": format!("{} event(s) updated successfully", ids.len()),
            "ids": ids,
        }))
    }
}
