use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use notable_editor::models::{load_records_file, read_records_from_stdin};
use notable_editor::utils::logging;
use notable_editor::{Config, EditMode, EditOptions, NotableEditor};

/// 批量编辑 notable 事件
///
/// 输入记录为 JSON 数组或 NDJSON，结果以 NDJSON 写到标准输出。
#[derive(Debug, Parser)]
#[command(name = "notable-editor", version)]
struct Cli {
    /// 编辑模式：batch（统一编辑）或 single（按 edit-* 字段逐条编辑）
    #[arg(long, default_value = "batch")]
    mode: EditMode,

    /// 备注
    #[arg(long)]
    comment: Option<String>,

    /// 状态
    #[arg(long)]
    status: Option<String>,

    /// 紧急程度
    #[arg(long)]
    urgency: Option<String>,

    /// 新负责人
    #[arg(long = "new-owner")]
    new_owner: Option<String>,

    /// 处置
    #[arg(long)]
    disposition: Option<String>,

    /// 输入文件，缺省时读取标准输入
    #[arg(long)]
    input: Option<PathBuf>,

    /// TOML 配置文件，缺省时从环境变量读取
    #[arg(long, env = "NOTABLE_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn edit_options(&self) -> EditOptions {
        EditOptions {
            mode: self.mode,
            comment: self.comment.clone(),
            status: self.status.clone(),
            urgency: self.urgency.clone(),
            new_owner: self.new_owner.clone(),
            disposition: self.disposition.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::from_toml_file(path).await?,
        None => Config::from_env()?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 读取输入记录
    let records = match &cli.input {
        Some(path) => load_records_file(path).await?,
        None => read_records_from_stdin().await?,
    };

    // 初始化并运行
    let outcome = NotableEditor::initialize(config)?
        .run(&cli.edit_options(), records)
        .await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in outcome.records() {
        serde_json::to_writer(&mut out, &record).context("无法写出结果记录")?;
        writeln!(out).context("无法写出结果记录")?;
    }

    Ok(())
}
