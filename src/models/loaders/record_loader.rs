use crate::error::{AppError, AppResult, FileError};
use crate::models::record::InputRecord;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// 从文件加载输入记录（JSON 数组或每行一个 JSON 对象）
pub async fn load_records_file(path: &Path) -> AppResult<Vec<InputRecord>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let records = parse_records(&content, &path.display().to_string())?;
    tracing::info!("成功加载 {} 条记录: {}", records.len(), path.display());
    Ok(records)
}

/// 从标准输入读取全部记录
pub async fn read_records_from_stdin() -> AppResult<Vec<InputRecord>> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .map_err(|e| AppError::file_read_failed("<stdin>", e))?;

    let records = parse_records(&content, "<stdin>")?;
    tracing::info!("成功从标准输入读取 {} 条记录", records.len());
    Ok(records)
}

/// 解析记录文本
///
/// 以 `[` 开头时按 JSON 数组解析，否则按 NDJSON 逐行解析，空行被忽略。
pub fn parse_records(content: &str, source: &str) -> AppResult<Vec<InputRecord>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<InputRecord>>(trimmed).map_err(|e| {
            AppError::File(FileError::RecordParseFailed {
                path: source.to_string(),
                line: e.line(),
                source: Box::new(e),
            })
        });
    }

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| {
            AppError::File(FileError::RecordParseFailed {
                path: source.to_string(),
                line: idx + 1,
                source: Box::new(e),
            })
        })?;
        match value {
            Value::Object(fields) => records.push(InputRecord::new(fields)),
            other => {
                return Err(AppError::File(FileError::RecordParseFailed {
                    path: source.to_string(),
                    line: idx + 1,
                    source: format!("期望 JSON 对象，实际为: {}", other).into(),
                }))
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let records = parse_records(
            r#"[{"event_id": "A"}, {"rule_id": "B", "edit-comment": "ok"}]"#,
            "test",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event_id(), Some("A".to_string()));
        assert!(records[1].has_override_fields());
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let records = parse_records("{\"event_id\": \"A\"}\n\n{\"event_id\": \"B\"}\n", "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].event_id(), Some("B".to_string()));
    }

    #[test]
    fn test_parse_reports_line_of_bad_record() {
        let err = parse_records("{\"event_id\": \"A\"}\n42\n", "input.json").unwrap_err();
        match err {
            AppError::File(FileError::RecordParseFailed { path, line, .. }) => {
                assert_eq!(path, "input.json");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_records("  \n", "test").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_records_file_missing_path() {
        let result = load_records_file(Path::new("/nonexistent/records.json")).await;
        tokio_test::assert_err!(result);
    }
}
