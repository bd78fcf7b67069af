//! 候选输入通道：把按行分隔的文本读成 `CandidateStore`。
//!
//! 格式（与 stdin 管道一致）：
//! - 每行一个候选，去掉结尾的 `\n`，其他字符（包括空行、`\r`）原样保留
//! - 非法 UTF-8 字节替换为 U+FFFD，不报错
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use sift_core::model::CandidateStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("无法打开候选文件 {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("读取第 {line} 行候选失败")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

pub struct LineSource;

impl LineSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<CandidateStore, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(mut reader: impl BufRead) -> Result<CandidateStore, SourceError> {
        let mut store = CandidateStore::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| SourceError::Read {
                    line: store.len() + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            store.push(String::from_utf8_lossy(&buf));
        }
        log::debug!("loaded {} candidates", store.len());
        Ok(store)
    }
}
