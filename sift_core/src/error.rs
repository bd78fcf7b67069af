//! 错误类型。
//!
//! 只有两类错误会离开 core：编辑被拒绝（由 processor 吸收）与配置非法（启动前致命）。
use thiserror::Error;

/// 输入缓冲区的编辑错误；缓冲区保持原状。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("输入超出容量：当前 {len} 字节，追加 {additional} 字节，上限 {capacity} 字节")]
    CapacityExceeded {
        len: usize,
        additional: usize,
        capacity: usize,
    },
}

/// 配置校验错误；会话开始前即终止。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("纵向布局的行数必须大于 0")]
    ZeroLines,
    #[error("横向布局的宽度预算必须大于 0")]
    ZeroBudget,
    #[error("分词符必须是可打印的 ASCII 字符，而不是 {0:?}")]
    InvalidDelimiter(char),
    #[error("查询长度上限必须大于 0")]
    ZeroQueryCapacity,
}
