use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 枚举值解析（上游）错误
    #[error("上游错误: {0}")]
    Upstream(#[from] UpstreamError),
    /// 编辑请求校验错误
    #[error("编辑错误: {0}")]
    Edit(#[from] EditError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 枚举值解析失败，调用在任何编辑之前中止
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 查询 reviewstatuses 集合失败
    #[error("无法读取状态/处置参考数据: {source}")]
    ReferenceStoreUnavailable {
        #[source]
        source: Box<AppError>,
    },
    /// 查询 urgency lookup 失败
    #[error("无法读取紧急程度列表: {source}")]
    UrgencyLookupUnavailable {
        #[source]
        source: Box<AppError>,
    },
}

/// 致命的输入校验错误
///
/// 任何一种都会在发送更新请求之前中止整个调用。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// 模式与参数互相矛盾
    #[error("参数冲突: {reason}")]
    ConflictingOptions { reason: String },
    /// 提供的枚举值不在有效集合中
    #[error("{field} 的值 '{value}' 无效，有效值为: [{}]", .valid.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        valid: Vec<String>,
    },
    /// 批量模式下没有任何可编辑字段
    #[error("请至少提供 comment、status、urgency、newOwner、disposition 中的一个参数")]
    NoEditsRequested,
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 任务执行失败（panic 或被取消）
    #[error("任务执行失败: {message}")]
    TaskFailed { message: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项缺失
    #[error("缺少配置项: {name}")]
    Missing { name: String },
    /// 配置项取值非法
    #[error("配置项 {name} 无效: {reason}")]
    Invalid { name: String, reason: String },
    /// 构建 HTTP 客户端失败
    #[error("无法创建 HTTP 客户端: {source}")]
    ClientBuildFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 输入记录解析失败
    #[error("输入记录解析失败 ({path}, 第 {line} 行): {source}")]
    RecordParseFailed {
        path: String,
        line: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API错误响应
    pub fn api_bad_response(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    /// 创建JSON解析错误
    pub fn json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_message_lists_valid_values() {
        let err = EditError::InvalidEnumValue {
            field: "urgency",
            value: "extreme".to_string(),
            valid: vec!["critical".to_string(), "high".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("extreme"));
        assert!(msg.contains("critical, high"));
    }

    #[test]
    fn test_edit_error_converts_into_app_error() {
        let err: AppError = EditError::NoEditsRequested.into();
        assert!(matches!(err, AppError::Edit(EditError::NoEditsRequested)));
    }
}
