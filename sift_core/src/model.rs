use crate::paginator::TextMeasure;

/// 候选行（输入的一行文本）。
///
/// 注意：`score` 只对模糊匹配有意义，每次模糊匹配都会重写。
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 原始文本（不含换行符）
    pub text: String,
    /// 已经以“保持会话”方式输出过
    pub marked: bool,
    /// 模糊匹配得分（越小越靠前）
    pub score: f64,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: false,
            score: 0.0,
        }
    }
}

/// 候选仓库：会话开始时一次性构建，整个会话期间顺序不变、不增不减。
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    items: Vec<Candidate>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.items.push(Candidate::new(text));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Candidate> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.items.iter_mut()
    }

    /// 最宽候选的宽度（用于横向布局时估算输入框宽度）。
    pub fn widest(&self, measure: &dyn TextMeasure) -> usize {
        self.items
            .iter()
            .map(|c| measure.width(&c.text))
            .max()
            .unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Candidate::new).collect(),
        }
    }
}

/// 当前页中的一项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub text: String,
    pub selected: bool,
    pub marked: bool,
}

/// 引擎给 UI 的“快照视图”。
///
/// UI 层只读 `UiState`，每次事件处理之后据此重绘。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// 光标左侧的查询文本
    pub before_cursor: String,
    /// 光标右侧的查询文本
    pub after_cursor: String,
    /// 光标的字节偏移
    pub cursor: usize,
    /// 当前页（窗口）中的候选
    pub page: Vec<PageItem>,
    /// 窗口之前还有候选
    pub has_prev: bool,
    /// 窗口之后还有候选
    pub has_next: bool,
    /// 匹配总数
    pub match_count: usize,
}

impl UiState {
    /// 完整查询文本。
    pub fn query(&self) -> String {
        format!("{}{}", self.before_cursor, self.after_cursor)
    }

    pub fn selected(&self) -> Option<&PageItem> {
        self.page.iter().find(|item| item.selected)
    }
}
