//! `Config`：会话开始时读取，之后不可变。
use serde::Deserialize;

use crate::error::ConfigError;
use crate::matcher::Ranking;
use crate::paginator::Layout;

/// 查询缓冲区的默认容量（字节）。
pub const DEFAULT_MAX_QUERY_LEN: usize = 8191;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 是否区分大小写（只影响 ASCII）
    pub case_sensitive: bool,
    /// 排序策略
    pub ranking: Ranking,
    /// 分页方式
    pub layout: Layout,
    /// 分词符：既用于切分 token，也用于按词移动光标
    pub delimiter: char,
    /// 查询串最大字节数
    pub max_query_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            ranking: Ranking::default(),
            layout: Layout::default(),
            delimiter: ' ',
            max_query_len: DEFAULT_MAX_QUERY_LEN,
        }
    }
}

impl Config {
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn max_query_len(mut self, len: usize) -> Self {
        self.max_query_len = len;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.layout {
            Layout::Lines(0) => return Err(ConfigError::ZeroLines),
            Layout::Budget(0) => return Err(ConfigError::ZeroBudget),
            _ => {}
        }
        if !self.delimiter.is_ascii() || self.delimiter.is_ascii_control() {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        if self.max_query_len == 0 {
            return Err(ConfigError::ZeroQueryCapacity);
        }
        Ok(())
    }

    /// 分词符的字节形式；非 ASCII 时在 `validate` 阶段已被拒绝。
    pub(crate) fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b' ')
    }
}
