//! `Context`：processor 链共享的唯一状态容器。
//!
//! 约定：
//! - `buffer`：查询串与光标
//! - `store`：全部候选（会话期间顺序不变）
//! - `matches`：当前查询下存活的候选，查询变化时整体重建
//! - `selection`：选中项与窗口
use crate::{
    buffer::EditBuffer,
    config::Config,
    key_event::{Action, ExitStatus},
    matcher::MatchList,
    model::{Candidate, CandidateStore, PageItem, UiState},
    paginator::Offsets,
    processor::EngineFacade,
    selection::Selection,
};

/// 会话上下文。
#[derive(Debug, Clone)]
pub struct Context {
    pub buffer: EditBuffer,
    pub store: CandidateStore,
    pub matches: MatchList,
    pub selection: Selection,
}

impl Context {
    pub fn new(store: CandidateStore, config: &Config) -> Self {
        Self {
            buffer: EditBuffer::new(config.max_query_len, config.delimiter_byte()),
            store,
            matches: MatchList::default(),
            selection: Selection::default(),
        }
    }

    /// 按当前查询串重建匹配列表，选中项回到列表头。
    pub fn rematch(&mut self, engine: &dyn EngineFacade) {
        self.matches = engine.rebuild(self.buffer.as_bytes(), &mut self.store);
        let len = self.matches.len();
        self.navigate(engine, |selection, calc| selection.reset(len, calc));
    }

    /// 在窗口计算函数可用的前提下操作 `selection`。
    pub fn navigate<R>(
        &mut self,
        engine: &dyn EngineFacade,
        op: impl FnOnce(&mut Selection, &dyn Fn(usize) -> Offsets) -> R,
    ) -> R {
        let matches = &self.matches;
        let store = &self.store;
        let calc = |anchor: usize| engine.offsets(matches, store, anchor);
        op(&mut self.selection, &calc)
    }

    /// 当前选中的候选。
    pub fn selected(&self) -> Option<&Candidate> {
        self.selected_index().and_then(|index| self.store.get(index))
    }

    fn selected_index(&self) -> Option<usize> {
        self.selection
            .current()
            .and_then(|position| self.matches.get(position))
    }

    /// 选中项是否没有前驱（或根本没有选中项）。
    pub fn selection_at_head(&self) -> bool {
        self.selection.current().is_none_or(|position| position == 0)
    }

    /// 生成 UI 层只读快照。
    pub fn ui_state(&self) -> UiState {
        let bytes = self.buffer.as_bytes();
        let cursor = self.buffer.cursor();
        let current = self.selection.current();
        let window = self.selection.window();
        let page = window
            .clone()
            .filter_map(|position| {
                let candidate = self.store.get(self.matches.get(position)?)?;
                Some(PageItem {
                    text: candidate.text.clone(),
                    selected: current == Some(position),
                    marked: candidate.marked,
                })
            })
            .collect();
        UiState {
            before_cursor: String::from_utf8_lossy(&bytes[..cursor]).into_owned(),
            after_cursor: String::from_utf8_lossy(&bytes[cursor..]).into_owned(),
            cursor,
            page,
            has_prev: window.start > 0,
            has_next: self.selection.offsets().next.is_some(),
            match_count: self.matches.len(),
        }
    }

    /// 确认：输出选中项（或原始查询串）。
    ///
    /// `keep_open` 时标记选中项并继续会话，否则结束会话。
    pub fn confirm(&mut self, raw: bool, keep_open: bool) -> Vec<Action> {
        let selected = if raw { None } else { self.selected_index() };
        let line = match selected.and_then(|index| self.store.get(index)) {
            Some(candidate) => candidate.text.clone(),
            None => self.buffer.text().into_owned(),
        };
        let mut actions = vec![Action::Emit(line)];
        if keep_open {
            if let Some(candidate) = self.selected_index().and_then(|i| self.store.get_mut(i)) {
                candidate.marked = true;
            }
        } else {
            actions.push(Action::Exit(ExitStatus::Success));
        }
        actions
    }

    /// 用选中项替换查询串；没有选中项时返回 false。
    pub fn complete(&mut self) -> bool {
        let Some(text) = self.selected().map(|c| c.text.clone()) else {
            return false;
        };
        self.buffer.replace(&text);
        true
    }
}
