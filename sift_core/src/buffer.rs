//! `EditBuffer`：查询串与光标。
//!
//! 约定：
//! - `text` 是字节序列（粘贴内容可能不是合法 UTF-8），容量固定
//! - `cursor` 是字节偏移，所有移动都按码点整体进行
//! - 缓冲区本身不触发匹配；调用方根据返回值决定是否重新匹配
use std::borrow::Cow;

use crate::error::EditError;
use crate::utf8;

/// 光标移动方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct EditBuffer {
    text: Vec<u8>,
    cursor: usize,
    capacity: usize,
    delimiter: u8,
}

impl EditBuffer {
    /// `capacity` 是查询串的最大字节数；`delimiter` 是分词字节。
    pub fn new(capacity: usize, delimiter: u8) -> Self {
        Self {
            text: Vec::new(),
            cursor: 0,
            capacity,
            delimiter,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// 查询串的文本形式（非法字节显示为 U+FFFD）。
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.text.len()
    }

    /// 在光标处插入字节并把光标移到插入内容之后。
    ///
    /// 超出容量时拒绝插入，缓冲区保持原状（不做截断）。
    pub fn insert(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        if self.text.len() + bytes.len() > self.capacity {
            return Err(EditError::CapacityExceeded {
                len: self.text.len(),
                additional: bytes.len(),
                capacity: self.capacity,
            });
        }
        self.text
            .splice(self.cursor..self.cursor, bytes.iter().copied());
        self.cursor += bytes.len();
        Ok(())
    }

    /// 删除光标左侧 `len` 个字节；返回文本是否改变。
    pub fn remove(&mut self, len: usize) -> bool {
        let len = len.min(self.cursor);
        if len == 0 {
            return false;
        }
        self.text.drain(self.cursor - len..self.cursor);
        self.cursor -= len;
        true
    }

    /// 删除光标左侧一个码点。
    pub fn backspace(&mut self) -> bool {
        let start = utf8::prev_boundary(&self.text, self.cursor);
        self.remove(self.cursor - start)
    }

    /// 删除光标右侧一个码点。
    pub fn delete(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor = utf8::next_boundary(&self.text, self.cursor);
        self.backspace()
    }

    /// 删除光标到末尾的内容。
    pub fn kill_to_end(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.text.truncate(self.cursor);
        true
    }

    /// 删除开头到光标的内容。
    pub fn kill_to_start(&mut self) -> bool {
        self.remove(self.cursor)
    }

    /// 删除光标左侧的一个词（先删分隔符，再删词本身）。
    pub fn kill_word(&mut self) -> bool {
        let start = self.word_start();
        self.remove(self.cursor - start)
    }

    /// 用 `text` 替换整个查询串，光标放到末尾。
    ///
    /// 超出容量时在码点边界上截断。
    pub fn replace(&mut self, text: &str) {
        let mut end = text.len().min(self.capacity);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        self.text.extend_from_slice(&text.as_bytes()[..end]);
        self.cursor = self.text.len();
    }

    /// 清空查询串；返回文本是否改变。
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }

    /// 按码点移动一格；到达两端时不动。
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Left => utf8::prev_boundary(&self.text, self.cursor),
            Direction::Right => utf8::next_boundary(&self.text, self.cursor),
        };
        self.set_cursor(target)
    }

    /// 移动到词边界。
    ///
    /// 向左：先越过左侧的分隔符，再越过词本身，停在词首。向右与之对称，停在词尾。
    pub fn move_word_edge(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Left => self.word_start(),
            Direction::Right => self.word_end(),
        };
        self.set_cursor(target)
    }

    pub fn cursor_home(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn cursor_end(&mut self) -> bool {
        self.set_cursor(self.text.len())
    }

    fn set_cursor(&mut self, target: usize) -> bool {
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }

    fn is_delimiter(&self, offset: usize) -> bool {
        self.text.get(offset) == Some(&self.delimiter)
    }

    fn word_start(&self) -> usize {
        let mut pos = self.cursor;
        while pos > 0 && self.is_delimiter(utf8::prev_boundary(&self.text, pos)) {
            pos = utf8::prev_boundary(&self.text, pos);
        }
        while pos > 0 && !self.is_delimiter(utf8::prev_boundary(&self.text, pos)) {
            pos = utf8::prev_boundary(&self.text, pos);
        }
        pos
    }

    fn word_end(&self) -> usize {
        let len = self.text.len();
        let mut pos = self.cursor;
        while pos < len && self.is_delimiter(pos) {
            pos = utf8::next_boundary(&self.text, pos);
        }
        while pos < len && !self.is_delimiter(pos) {
            pos = utf8::next_boundary(&self.text, pos);
        }
        pos
    }
}
