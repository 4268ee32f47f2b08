/// notable 服务 HTTP 客户端
///
/// 封装所有与远端 REST 接口相关的调用逻辑
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::clients::NotableBackend;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{ReviewStatusEntry, UpdateRequest};
use crate::utils::logging::truncate_text;

const NOTABLE_UPDATE_PATH: &str = "services/notable_update";
const SEARCH_JOBS_PATH: &str = "services/search/jobs";

/// notable 服务客户端
pub struct NotableClient {
    http: reqwest::Client,
    base_url: String,
    session_key: String,
    app: String,
    collection: String,
    urgency_lookup: String,
}

impl NotableClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!config.verify_tls);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ConfigError::ClientBuildFailed {
            source: Box::new(e),
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_key: config.session_key.clone(),
            app: config.app.clone(),
            collection: config.collection.clone(),
            urgency_lookup: config.urgency_lookup.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 紧急程度查询语句
    fn urgency_search(&self) -> String {
        format!(
            "| inputlookup {} | stats count by urgency | fields urgency",
            self.urgency_lookup
        )
    }

    /// 发送请求并解析 JSON，非 2xx 视为错误
    async fn send_json(&self, endpoint: &str, request: RequestBuilder) -> AppResult<Value> {
        let response = request
            .header(AUTHORIZATION, format!("Splunk {}", self.session_key))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("{} 返回 {}: {}", endpoint, status, truncate_text(&body, 200));

        if !status.is_success() {
            return Err(AppError::api_bad_response(
                endpoint,
                status.as_u16(),
                truncate_text(&body, 200),
            ));
        }

        serde_json::from_str(&body).map_err(|e| AppError::json_parse_failed(endpoint, e))
    }
}

/// 更新接口的表单参数，`ruleUIDs` 每个标识一项
pub fn update_form_params(request: &UpdateRequest) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = request
        .target_ids()
        .as_slice()
        .iter()
        .map(|id| ("ruleUIDs", id.clone()))
        .collect();

    for (field, value) in request.fields().entries() {
        params.push((field.param_name(), value.to_string()));
    }
    params.push(("output_mode", "json".to_string()));
    params
}

#[async_trait]
impl NotableBackend for NotableClient {
    async fn list_review_statuses(&self) -> AppResult<Vec<ReviewStatusEntry>> {
        let endpoint = self.endpoint(&format!(
            "servicesNS/nobody/{}/storage/collections/data/{}",
            self.app, self.collection
        ));
        let request = self
            .http
            .get(&endpoint)
            .query(&[("output_mode", "json")]);

        let value = self.send_json(&endpoint, request).await?;
        serde_json::from_value(value).map_err(|e| AppError::json_parse_failed(endpoint, e))
    }

    async fn list_urgencies(&self) -> AppResult<Vec<String>> {
        let endpoint = self.endpoint(SEARCH_JOBS_PATH);
        let search = self.urgency_search();
        let request = self.http.post(&endpoint).form(&[
            ("search", search.as_str()),
            ("exec_mode", "oneshot"),
            ("output_mode", "json"),
            ("count", "0"),
        ]);

        let value = self.send_json(&endpoint, request).await?;
        let urgencies = value
            .get("results")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.get("urgency").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(urgencies)
    }

    async fn update_notables(&self, request: &UpdateRequest) -> AppResult<Value> {
        let endpoint = self.endpoint(NOTABLE_UPDATE_PATH);
        let params = update_form_params(request);

        debug!("更新 notable Payload: {:?}", params);

        let http_request = self.http.post(&endpoint).form(&params);
        self.send_json(&endpoint, http_request).await
    }
}
