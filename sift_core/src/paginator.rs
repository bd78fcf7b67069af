//! `paginator`：把线性的匹配列表切成一页（窗口）。
//!
//! 从窗口起点 `anchor` 出发：
//! - 向前累加代价，找到第一个放不下的位置 `next`（窗口的开区间终点）
//! - 向后累加代价，找到上一页的起点 `prev`
//!
//! 两个方向对称，翻页不必每次从列表头重新推导。
use std::ops::Range;

use serde::Deserialize;

use crate::matcher::MatchList;
use crate::model::CandidateStore;

/// 文本宽度度量（由渲染层提供，单位不限：像素、终端列……）。
pub trait TextMeasure {
    fn width(&self, text: &str) -> usize;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn width(&self, text: &str) -> usize {
        (**self).width(text)
    }
}

/// 布局方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// 纵向：每行一个候选，最多 N 行
    Lines(usize),
    /// 横向：候选宽度之和不超过预算
    Budget(usize),
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Budget(80)
    }
}

impl Layout {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Layout::Lines(_))
    }
}

/// 一次窗口计算的结果（都是 `MatchList` 中的位置）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offsets {
    /// 上一页的起点；窗口已在列表头时就是列表头，列表为空时为 None
    pub prev: Option<usize>,
    /// 第一个不在窗口中的位置；窗口延伸到列表末尾时为 None
    pub next: Option<usize>,
}

pub struct Paginator<M> {
    layout: Layout,
    measure: M,
}

impl<M: TextMeasure> Paginator<M> {
    pub fn new(layout: Layout, measure: M) -> Self {
        Self { layout, measure }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn budget(&self) -> usize {
        match self.layout {
            Layout::Lines(lines) => lines,
            Layout::Budget(budget) => budget,
        }
    }

    /// 单个候选占用的代价；超出预算的候选按预算计，仍然独占一格。
    fn cost(&self, text: &str) -> usize {
        match self.layout {
            Layout::Lines(_) => 1,
            Layout::Budget(budget) => self.measure.width(text).min(budget),
        }
    }

    fn cost_at(&self, matches: &MatchList, store: &CandidateStore, position: usize) -> usize {
        matches
            .get(position)
            .and_then(|index| store.get(index))
            .map_or(0, |candidate| self.cost(&candidate.text))
    }

    /// 以 `anchor` 为窗口起点计算 `prev`/`next`。
    pub fn calc_offsets(&self, matches: &MatchList, store: &CandidateStore, anchor: usize) -> Offsets {
        let budget = self.budget();

        let mut used = 0;
        let mut next = None;
        for position in anchor..matches.len() {
            used += self.cost_at(matches, store, position);
            if used > budget {
                next = Some(position);
                break;
            }
        }

        let mut used = 0;
        let mut prev = anchor.min(matches.len());
        while prev > 0 {
            used += self.cost_at(matches, store, prev - 1);
            if used > budget {
                break;
            }
            prev -= 1;
        }

        let offsets = Offsets {
            prev: (!matches.is_empty()).then_some(prev),
            next,
        };
        log::trace!("window at {anchor}: {offsets:?}");
        offsets
    }

    /// 窗口覆盖的位置区间 `[anchor, next)`。
    pub fn window(&self, matches: &MatchList, anchor: usize, offsets: Offsets) -> Range<usize> {
        anchor.min(matches.len())..offsets.next.unwrap_or(matches.len())
    }
}
