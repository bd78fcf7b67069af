/// 输入事件（逻辑键盘事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体平台键值。
/// - 前端负责把按键（或 REPL 命令）转换成这些事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 键入的文本；以控制字符开头时忽略
    Insert(String),
    /// 粘贴的原始字节（可能不是合法 UTF-8）；只取第一行
    Paste(Vec<u8>),
    /// 删除光标前一个字符
    Backspace,
    /// 删除光标后一个字符
    Delete,
    /// 删除光标到行尾
    KillToEnd,
    /// 删除行首到光标
    KillToStart,
    /// 删除光标前一个词
    KillWord,
    /// 清空查询串
    Clear,
    /// 光标左移；横向布局下也可能移动选中项
    Left,
    /// 光标右移；到达末尾后移动选中项
    Right,
    WordLeft,
    WordRight,
    Up,
    Down,
    PageUp,
    PageDown,
    /// 选中项已在列表头时移动光标到行首，否则跳到列表头
    Home,
    /// 光标不在行尾时移动到行尾，否则跳到列表尾
    End,
    /// 用选中项替换查询串（Tab 补全）
    Complete,
    /// 确认输出
    ///
    /// - `raw`：忽略选中项，输出原始查询串
    /// - `keep_open`：输出后不退出，并标记选中项
    Confirm { raw: bool, keep_open: bool },
    /// 放弃（不输出）
    Cancel,
}

/// 会话结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// 已确认输出
    Success,
    /// 用户放弃
    Cancelled,
}

/// 引擎输出动作（对宿主的“副作用”请求）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 向输出通道写一行
    Emit(String),
    /// 结束会话
    Exit(ExitStatus),
}
