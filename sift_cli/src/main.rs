use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use env_logger::Env;
use sift_core::{
    config::Config,
    key_event::ExitStatus,
    matcher::Ranking,
    model::CandidateStore,
    paginator::{Layout, TextMeasure},
    session::Session,
};
use sift_measure::DisplayWidth;
use sift_source::LineSource;

mod repl;

/// 从标准输入（或 --input 文件）读取候选，交互过滤后把选中项写到标准输出。
#[derive(Parser, Debug)]
#[command(name = "sift", version)]
#[command(about = "按行读取候选，交互式过滤并输出选中项", long_about = None)]
struct Cli {
    /// 使用子串/前缀匹配（默认模糊匹配）
    #[arg(short = 'F', long)]
    substring: bool,

    /// 忽略大小写（只影响 ASCII）
    #[arg(short, long)]
    ignore_case: bool,

    /// 纵向列表，每页 N 行
    #[arg(short, long, value_name = "N")]
    lines: Option<usize>,

    /// 横向列表的总宽度（终端列）
    #[arg(short, long, value_name = "N", env = "SIFT_WIDTH")]
    width: Option<usize>,

    /// 输入框前的提示符
    #[arg(short, long, default_value = "")]
    prompt: String,

    /// 分词符
    #[arg(long, value_name = "C")]
    delimiter: Option<char>,

    /// 查询串最大字节数
    #[arg(long, value_name = "N")]
    max_query: Option<usize>,

    /// 从文件读取候选；此时交互命令从标准输入读取
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    match run(Cli::parse()) {
        Ok(ExitStatus::Success) => {}
        Ok(ExitStatus::Cancelled) => process::exit(1),
        Err(err) => {
            eprintln!("错误：{err}");
            for cause in err.chain().skip(1) {
                eprintln!("  原因：{cause}");
            }
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<ExitStatus> {
    let env = Env::default().default_filter_or(if cli.debug { "debug" } else { "warn" });
    env_logger::Builder::from_env(env).init();

    let store = match &cli.input {
        Some(path) => LineSource::from_path(path)?,
        None => LineSource::from_reader(io::stdin().lock()).context("读取标准输入失败")?,
    };

    let measure = DisplayWidth::new();
    let config = apply_flags(load_config(cli.config.as_deref())?, &cli, &store, &measure);
    log::debug!("config: {config:?}");

    let mut session = Session::new(&config, measure, store).context("配置无效")?;

    let status = if cli.input.is_some() {
        repl::run(
            &mut session,
            &cli.prompt,
            &mut io::stdin().lock(),
            &mut io::stderr(),
            &mut io::stdout(),
        )
    } else {
        // 候选占用了标准输入，交互命令改从终端读取
        let tty = File::open("/dev/tty").context("无法打开 /dev/tty")?;
        repl::run(
            &mut session,
            &cli.prompt,
            &mut BufReader::new(tty),
            &mut io::stderr(),
            &mut io::stdout(),
        )
    }
    .context("交互失败")?;
    Ok(status)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("配置文件格式错误 {}", path.display()))
}

/// 命令行参数覆盖配置文件。
fn apply_flags(mut config: Config, cli: &Cli, store: &CandidateStore, measure: &dyn TextMeasure) -> Config {
    if cli.substring {
        config = config.ranking(Ranking::Substring);
    }
    if cli.ignore_case {
        config = config.case_sensitive(false);
    }
    if let Some(delimiter) = cli.delimiter {
        config = config.delimiter(delimiter);
    }
    if let Some(len) = cli.max_query {
        config = config.max_query_len(len);
    }
    if let Some(lines) = cli.lines {
        config = config.layout(Layout::Lines(lines));
    } else if let Some(width) = cli.width {
        let budget = horizontal_budget(width, &cli.prompt, store, measure);
        config = config.layout(Layout::Budget(budget));
    }
    config
}

/// 横向列表可用的宽度：总宽度减去提示符、输入框和两侧箭头。
///
/// 输入框宽度取最宽候选，但不超过总宽度的三分之一。
fn horizontal_budget(width: usize, prompt: &str, store: &CandidateStore, measure: &dyn TextMeasure) -> usize {
    let prompt_width = if prompt.is_empty() { 0 } else { measure.width(prompt) };
    let input_width = store.widest(measure).min(width / 3);
    width.saturating_sub(prompt_width + input_width + 6).max(1)
}
