//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `Context` 做状态变更，并可产生 `Action`（例如 Emit）。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：编辑查询串并触发重新匹配；按词移动光标
//! - `NavigationProcessor`：光标/选中项移动与翻页
//! - `ConfirmProcessor`：确认输出与放弃

use crate::{
    buffer::Direction,
    context::Context,
    key_event::{Action, ExitStatus, InputEvent},
    matcher::MatchList,
    model::CandidateStore,
    paginator::{Layout, Offsets},
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型）。
pub trait EngineFacade {
    /// 按查询串重建匹配列表（模糊匹配会改写候选的 score）
    fn rebuild(&self, query: &[u8], store: &mut CandidateStore) -> MatchList;
    /// 以 `anchor` 为窗口起点计算上一页/下一页位置
    fn offsets(&self, matches: &MatchList, store: &CandidateStore, anchor: usize) -> Offsets;
    fn layout(&self) -> Layout;
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
pub trait Processor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

/// 编辑查询串的 processor。
///
/// 每次文本真正改变都只触发一次重新匹配；纯光标移动不触发。
pub struct EditingProcessor;

impl EditingProcessor {
    fn insert(engine: &dyn EngineFacade, context: &mut Context, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        match context.buffer.insert(bytes) {
            Ok(()) => context.rematch(engine),
            Err(err) => log::debug!("insertion rejected: {err}"),
        }
    }
}

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        let changed = match input_event {
            InputEvent::Insert(text) => {
                if !text.starts_with(|c: char| c.is_control()) {
                    Self::insert(engine, context, text.as_bytes());
                }
                false
            }
            InputEvent::Paste(bytes) => {
                let line = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
                Self::insert(engine, context, line);
                false
            }
            InputEvent::Backspace => context.buffer.backspace(),
            InputEvent::Delete => context.buffer.delete(),
            InputEvent::KillToEnd => context.buffer.kill_to_end(),
            InputEvent::KillToStart => context.buffer.kill_to_start(),
            InputEvent::KillWord => context.buffer.kill_word(),
            InputEvent::Clear => context.buffer.clear(),
            InputEvent::Complete => context.complete(),
            InputEvent::WordLeft => {
                context.buffer.move_word_edge(Direction::Left);
                false
            }
            InputEvent::WordRight => {
                context.buffer.move_word_edge(Direction::Right);
                false
            }
            _ => return (ProcessStatus::Continue, Vec::new()),
        };
        if changed {
            context.rematch(engine);
        }
        (ProcessStatus::Consume, Vec::new())
    }
}

/// 光标与选中项移动的 processor。
pub struct NavigationProcessor;

impl Processor for NavigationProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        let vertical = engine.layout().is_vertical();
        match input_event {
            // 纵向布局下左右键只管光标；横向布局下光标到头后改为移动选中项
            InputEvent::Left => {
                if !context.buffer.at_start() && (vertical || context.selection_at_head()) {
                    context.buffer.move_cursor(Direction::Left);
                } else if !vertical {
                    context.navigate(engine, |s, calc| s.move_prev(calc));
                }
            }
            InputEvent::Right => {
                if !context.buffer.at_end() {
                    context.buffer.move_cursor(Direction::Right);
                } else if !vertical {
                    context.navigate(engine, |s, calc| s.move_next(calc));
                }
            }
            InputEvent::Up => {
                context.navigate(engine, |s, calc| s.move_prev(calc));
            }
            InputEvent::Down => {
                context.navigate(engine, |s, calc| s.move_next(calc));
            }
            InputEvent::PageUp => {
                context.navigate(engine, |s, calc| s.page_prev(calc));
            }
            InputEvent::PageDown => {
                context.navigate(engine, |s, calc| s.page_next(calc));
            }
            InputEvent::Home => {
                if context.selection_at_head() {
                    context.buffer.cursor_home();
                } else {
                    context.navigate(engine, |s, calc| s.jump_start(calc));
                }
            }
            InputEvent::End => {
                if !context.buffer.at_end() {
                    context.buffer.cursor_end();
                } else {
                    context.navigate(engine, |s, calc| s.jump_end(calc));
                }
            }
            _ => return (ProcessStatus::Continue, Vec::new()),
        }
        (ProcessStatus::Consume, Vec::new())
    }
}

/// 确认与放弃。
pub struct ConfirmProcessor;

impl Processor for ConfirmProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Confirm { raw, keep_open } => {
                (ProcessStatus::Consume, context.confirm(raw, keep_open))
            }
            InputEvent::Cancel => (
                ProcessStatus::Consume,
                vec![Action::Exit(ExitStatus::Cancelled)],
            ),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}
