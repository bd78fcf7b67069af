//! 宽度度量：给横向分页提供 `TextMeasure` 实现。
//!
//! 第一版只面向终端：宽度单位是终端列，不涉及字体。

use sift_core::paginator::TextMeasure;
use unicode_width::UnicodeWidthStr;

/// 终端显示宽度（东亚宽字符占两列）+ 左右留白。
///
/// 横向列表里每一项渲染成 `" text "`，所以默认留白是 2 列。
#[derive(Debug, Clone, Copy)]
pub struct DisplayWidth {
    padding: usize,
}

impl Default for DisplayWidth {
    fn default() -> Self {
        Self { padding: 2 }
    }
}

impl DisplayWidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

impl TextMeasure for DisplayWidth {
    fn width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text) + self.padding
    }
}

/// 按码点计数（不区分宽窄字符）。
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCount;

impl TextMeasure for CharCount {
    fn width(&self, text: &str) -> usize {
        text.chars().count()
    }
}
