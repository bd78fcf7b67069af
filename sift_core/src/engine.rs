use crate::config::Config;
use crate::error::ConfigError;
use crate::matcher::{MatchList, Matcher};
use crate::model::CandidateStore;
use crate::paginator::{Layout, Offsets, Paginator, TextMeasure};
use crate::processor::EngineFacade;

/// 引擎：配置阶段确定的行为（匹配策略 + 分页方式 + 宽度度量）。
///
/// 结构上对应流水线：
/// - buffer（查询串） -> matcher（过滤/排序） -> paginator（窗口） -> 输出 UiState
pub struct Engine<M> {
    matcher: Matcher,
    paginator: Paginator<M>,
}

impl<M> Engine<M>
where
    M: TextMeasure,
{
    /// 校验配置并组装引擎；配置非法时会话无法开始。
    pub fn new(config: &Config, measure: M) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            matcher: Matcher::new(
                config.ranking,
                config.case_sensitive,
                config.delimiter_byte(),
            ),
            paginator: Paginator::new(config.layout, measure),
        })
    }

    pub fn paginator(&self) -> &Paginator<M> {
        &self.paginator
    }
}

impl<M> EngineFacade for Engine<M>
where
    M: TextMeasure,
{
    fn rebuild(&self, query: &[u8], store: &mut CandidateStore) -> MatchList {
        self.matcher.rebuild(query, store)
    }

    fn offsets(&self, matches: &MatchList, store: &CandidateStore, anchor: usize) -> Offsets {
        self.paginator.calc_offsets(matches, store, anchor)
    }

    fn layout(&self) -> Layout {
        self.paginator.layout()
    }
}
