//! `Session`：对上层（CLI/GUI）提供的会话对象。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有 `Context`（状态）
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `UiState` + `Action`

use crate::{
    config::Config,
    context::Context,
    engine::Engine,
    error::ConfigError,
    key_event::{Action, InputEvent},
    model::{CandidateStore, UiState},
    paginator::{Layout, TextMeasure},
    processor::{ConfirmProcessor, EditingProcessor, NavigationProcessor, ProcessStatus, Processor},
};

/// 一次选择过程的状态机容器。
pub struct Session<M> {
    /// 引擎（匹配策略、分页方式、宽度度量）
    engine: Engine<M>,
    /// 会话上下文（processors 共享）
    ctx: Context,
    /// processors 链
    processors: Vec<Box<dyn Processor>>,
}

impl<M> Session<M>
where
    M: TextMeasure,
{
    /// 创建会话：校验配置，组装默认 processors 链，并对空查询做第一次匹配。
    pub fn new(config: &Config, measure: M, store: CandidateStore) -> Result<Self, ConfigError> {
        let engine = Engine::new(config, measure)?;
        let mut ctx = Context::new(store, config);
        ctx.rematch(&engine);
        Ok(Self {
            engine,
            ctx,
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(NavigationProcessor),
                Box::new(ConfirmProcessor),
            ],
        })
    }

    /// 获取当前 UI 快照（只读）。
    pub fn ui_state(&self) -> UiState {
        self.ctx.ui_state()
    }

    pub fn layout(&self) -> Layout {
        self.engine.paginator().layout()
    }

    /// 处理一个输入事件，返回最新 UI 快照与动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> (UiState, Vec<Action>) {
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&self.engine, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ctx.ui_state(), actions)
    }
}
