//! `selection`：当前选中项与窗口位置的状态机。
//!
//! 状态只有两个：`Empty`（没有匹配）与 `Active`（`current` 指向某个匹配）。
//! 窗口的 `prev/next` 由调用方传入的 `calc` 计算（见 `paginator`）。
use std::ops::Range;

use crate::paginator::Offsets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Active,
}

/// 选中项 + 窗口。
///
/// 不变量：`Active` 时 `current ∈ [anchor, next)`；`Empty` 时全部为空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    len: usize,
    anchor: Option<usize>,
    current: Option<usize>,
    offsets: Offsets,
}

impl Selection {
    pub fn state(&self) -> SelectionState {
        if self.current.is_some() {
            SelectionState::Active
        } else {
            SelectionState::Empty
        }
    }

    /// 选中项在 `MatchList` 中的位置。
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn offsets(&self) -> Offsets {
        self.offsets
    }

    /// 窗口覆盖的位置区间；`Empty` 时为空区间。
    pub fn window(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) => anchor..self.offsets.next.unwrap_or(self.len),
            None => 0..0,
        }
    }

    /// 匹配列表重建后调用：丢弃旧的选中项，回到列表头。
    pub fn reset(&mut self, len: usize, calc: &dyn Fn(usize) -> Offsets) {
        *self = Self::default();
        if len == 0 {
            return;
        }
        self.len = len;
        self.current = Some(0);
        self.reanchor(0, calc);
    }

    pub fn move_next(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if current + 1 >= self.len {
            return false;
        }
        let current = current + 1;
        self.current = Some(current);
        if self.offsets.next == Some(current) {
            self.reanchor(current, calc);
        }
        true
    }

    pub fn move_prev(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if current == 0 {
            return false;
        }
        self.current = Some(current - 1);
        if self.anchor == Some(current) {
            let anchor = self.offsets.prev.unwrap_or(current - 1);
            self.reanchor(anchor, calc);
        }
        true
    }

    pub fn page_next(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        let Some(next) = self.offsets.next else {
            return false;
        };
        self.current = Some(next);
        self.reanchor(next, calc);
        true
    }

    pub fn page_prev(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        let Some(prev) = self.offsets.prev else {
            return false;
        };
        self.current = Some(prev);
        self.reanchor(prev, calc);
        true
    }

    /// 跳到列表头。
    pub fn jump_start(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        if self.state() == SelectionState::Empty {
            return false;
        }
        self.current = Some(0);
        self.reanchor(0, calc);
        true
    }

    /// 跳到列表尾，并让最后一页尽量填满。
    pub fn jump_end(&mut self, calc: &dyn Fn(usize) -> Offsets) -> bool {
        if self.state() == SelectionState::Empty {
            return false;
        }
        let tail = self.len - 1;
        if self.offsets.next.is_some() {
            // 先以尾部为起点求出上一页起点，再逐个右移直到窗口能延伸到末尾
            self.reanchor(tail, calc);
            let back = self.offsets.prev.unwrap_or(tail);
            self.reanchor(back, calc);
            while self.offsets.next.is_some() {
                let Some(anchor) = self.anchor.filter(|&a| a < tail) else {
                    break;
                };
                self.reanchor(anchor + 1, calc);
            }
        }
        self.current = Some(tail);
        true
    }

    fn reanchor(&mut self, anchor: usize, calc: &dyn Fn(usize) -> Offsets) {
        self.anchor = Some(anchor);
        self.offsets = calc(anchor);
    }
}
