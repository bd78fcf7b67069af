//! `matcher`：按查询串过滤并排序候选，产出 `MatchList`。
//!
//! 两种策略在配置时选定，会话中不可切换：
//! - `Ranking::Substring`：按分词符切出 token，全部命中才保留；再分“完全相等 / 首 token 前缀 / 其他”三档
//! - `Ranking::Fuzzy`：贪心子序列匹配，按 `ln(sidx + 2) + (eidx - sidx - qlen)` 升序稳定排序
//!
//! 比较都是字节级的；大小写不敏感时只折叠 ASCII。
use serde::Deserialize;

use crate::model::CandidateStore;

/// 排序策略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    Substring,
    #[default]
    Fuzzy,
}

/// 当前存活的候选（`CandidateStore` 下标），顺序即展示顺序。
///
/// 每次查询变化都整体重建，不做增量修补。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchList {
    order: Vec<usize>,
}

impl MatchList {
    /// 全部候选，保持仓库顺序。
    pub fn all(count: usize) -> Self {
        Self {
            order: (0..count).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 第 `position` 个匹配对应的仓库下标。
    pub fn get(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}

impl FromIterator<usize> for MatchList {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            order: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Matcher {
    ranking: Ranking,
    case_sensitive: bool,
    delimiter: u8,
}

impl Matcher {
    pub fn new(ranking: Ranking, case_sensitive: bool, delimiter: u8) -> Self {
        Self {
            ranking,
            case_sensitive,
            delimiter,
        }
    }

    /// 用 `query` 重新过滤整个仓库。
    ///
    /// 空查询直接返回全部候选，不做任何打分。
    pub fn rebuild(&self, query: &[u8], store: &mut CandidateStore) -> MatchList {
        if query.is_empty() {
            return MatchList::all(store.len());
        }
        let list = match self.ranking {
            Ranking::Substring => self.substring(query, store),
            Ranking::Fuzzy => self.fuzzy(query, store),
        };
        log::debug!(
            "matched {} of {} candidates ({:?})",
            list.len(),
            store.len(),
            self.ranking
        );
        list
    }

    fn substring(&self, query: &[u8], store: &CandidateStore) -> MatchList {
        let tokens: Vec<&[u8]> = query
            .split(|&b| b == self.delimiter)
            .filter(|token| !token.is_empty())
            .collect();

        let mut exact = Vec::new();
        let mut prefix = Vec::new();
        let mut rest = Vec::new();
        for (index, candidate) in store.iter().enumerate() {
            let text = candidate.text.as_bytes();
            if !tokens.iter().all(|token| self.contains(text, token)) {
                continue;
            }
            // 先完全相等，再首 token 前缀，最后其他子串命中
            match tokens.first() {
                None => exact.push(index),
                Some(_) if self.bytes_eq(text, query) => exact.push(index),
                Some(first) if self.starts_with(text, first) => prefix.push(index),
                Some(_) => rest.push(index),
            }
        }
        exact.into_iter().chain(prefix).chain(rest).collect()
    }

    fn fuzzy(&self, query: &[u8], store: &mut CandidateStore) -> MatchList {
        let qlen = query.len() as f64;
        let mut survivors = Vec::new();
        for (index, candidate) in store.iter_mut().enumerate() {
            let Some((sidx, eidx)) = self.subsequence(candidate.text.as_bytes(), query) else {
                continue;
            };
            // 起点越靠后、跨度越松散，得分越高（越靠后）
            candidate.score = (sidx as f64 + 2.0).ln() + (eidx as f64 - sidx as f64 - qlen);
            survivors.push((index, candidate.score));
        }
        // sort_by 是稳定排序：同分保持仓库顺序
        survivors.sort_by(|a, b| a.1.total_cmp(&b.1));
        survivors.into_iter().map(|(index, _)| index).collect()
    }

    /// 贪心匹配：返回首个与最后一个命中字节的位置。
    fn subsequence(&self, text: &[u8], query: &[u8]) -> Option<(usize, usize)> {
        let mut pending = query.iter();
        let mut want = pending.next()?;
        let mut start = None;
        for (i, &byte) in text.iter().enumerate() {
            if !self.byte_eq(byte, *want) {
                continue;
            }
            let sidx = *start.get_or_insert(i);
            match pending.next() {
                Some(next) => want = next,
                None => return Some((sidx, i)),
            }
        }
        None
    }

    fn byte_eq(&self, a: u8, b: u8) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(&b)
        }
    }

    fn bytes_eq(&self, a: &[u8], b: &[u8]) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }

    fn starts_with(&self, text: &[u8], prefix: &[u8]) -> bool {
        text.len() >= prefix.len() && self.bytes_eq(&text[..prefix.len()], prefix)
    }

    fn contains(&self, text: &[u8], needle: &[u8]) -> bool {
        if needle.len() > text.len() {
            return false;
        }
        text.windows(needle.len())
            .any(|window| self.bytes_eq(window, needle))
    }
}
