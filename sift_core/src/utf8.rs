//! `utf8`：单个码点的解码，以及光标移动所需的边界判断。
//!
//! 解码永远不会失败：非法首字节、被截断的多字节序列、过长编码、代理区码点
//! 都会退化成 `REPLACEMENT`，并且至少消费 1 个字节，保证调用方总能前进。

/// 非法输入时返回的替换码点（U+FFFD）。
pub const REPLACEMENT: char = '\u{FFFD}';

const UTF_SIZE: usize = 4;

// 下标 0 是续字节（10xxxxxx），1..=4 是对应长度序列的首字节。
const UTF_BYTE: [u8; UTF_SIZE + 1] = [0x80, 0x00, 0xC0, 0xE0, 0xF0];
const UTF_MASK: [u8; UTF_SIZE + 1] = [0xC0, 0x80, 0xE0, 0xF0, 0xF8];
const UTF_MIN: [u32; UTF_SIZE + 1] = [0, 0, 0x80, 0x800, 0x10000];
const UTF_MAX: [u32; UTF_SIZE + 1] = [0x10FFFF, 0x7F, 0x7FF, 0xFFFF, 0x10FFFF];

/// 识别单个字节的类别：返回（有效载荷位, 类别）。
///
/// 类别 0 表示续字节，1..=4 表示序列长度，5 表示任何位置都不合法的字节（0xF8..）。
fn decode_byte(byte: u8) -> (u32, usize) {
    for kind in 0..=UTF_SIZE {
        if byte & UTF_MASK[kind] == UTF_BYTE[kind] {
            return (u32::from(byte & !UTF_MASK[kind]), kind);
        }
    }
    (0, UTF_SIZE + 1)
}

/// 从 `bytes[offset..]` 解码一个码点，返回（码点, 消费的字节数）。
///
/// 消费字节数始终在 1..=4 之间；`offset` 越界时返回 `(REPLACEMENT, 1)`。
pub fn decode(bytes: &[u8], offset: usize) -> (char, usize) {
    let Some(&lead) = bytes.get(offset) else {
        return (REPLACEMENT, 1);
    };
    let (mut value, len) = decode_byte(lead);
    if !(1..=UTF_SIZE).contains(&len) {
        return (REPLACEMENT, 1);
    }

    for consumed in 1..len {
        // 输入提前结束，或者应当出现续字节的位置不是续字节
        let Some(&byte) = bytes.get(offset + consumed) else {
            return (REPLACEMENT, consumed);
        };
        let (bits, kind) = decode_byte(byte);
        if kind != 0 {
            return (REPLACEMENT, consumed);
        }
        value = (value << 6) | bits;
    }

    if value < UTF_MIN[len] || value > UTF_MAX[len] || (0xD800..=0xDFFF).contains(&value) {
        return (REPLACEMENT, len);
    }
    (char::from_u32(value).unwrap_or(REPLACEMENT), len)
}

/// `offset` 是否落在码点边界上（两端视为边界）。
pub fn is_boundary(bytes: &[u8], offset: usize) -> bool {
    offset == 0 || offset >= bytes.len() || !is_continuation(bytes[offset])
}

/// 下一个码点的起始位置；已在末尾时返回 `bytes.len()`。
///
/// 解码后继续跳过残留的续字节，与 `prev_boundary` 认定的边界一致。
pub fn next_boundary(bytes: &[u8], offset: usize) -> usize {
    if offset >= bytes.len() {
        return bytes.len();
    }
    let (_, consumed) = decode(bytes, offset);
    let mut pos = (offset + consumed).min(bytes.len());
    while !is_boundary(bytes, pos) {
        pos += 1;
    }
    pos
}

/// 上一个码点的起始位置：向左跳过续字节；已在开头时返回 0。
pub fn prev_boundary(bytes: &[u8], offset: usize) -> usize {
    let offset = offset.min(bytes.len());
    if offset == 0 {
        return 0;
    }
    let mut pos = offset - 1;
    while pos > 0 && is_continuation(bytes[pos]) {
        pos -= 1;
    }
    pos
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_sequence_length() {
        assert_eq!(decode(b"a", 0), ('a', 1));
        assert_eq!(decode("é".as_bytes(), 0), ('é', 2));
        assert_eq!(decode("世".as_bytes(), 0), ('世', 3));
        assert_eq!(decode("🦀".as_bytes(), 0), ('🦀', 4));
        assert_eq!(decode("x世".as_bytes(), 1), ('世', 3));
    }

    #[test]
    fn stray_continuation_byte_consumes_one() {
        assert_eq!(decode(&[0x80, b'a'], 0), (REPLACEMENT, 1));
        assert_eq!(decode(&[0xFF], 0), (REPLACEMENT, 1));
    }

    #[test]
    fn truncated_sequence_stops_before_the_offending_byte() {
        // E4 B8 是 "世" 的前两个字节，后面紧跟 ASCII
        assert_eq!(decode(&[0xE4, 0xB8, b'a'], 0), (REPLACEMENT, 2));
        // 输入在序列中间结束
        assert_eq!(decode(&[0xE4, 0xB8], 0), (REPLACEMENT, 2));
        assert_eq!(decode(&[0xF0], 0), (REPLACEMENT, 1));
    }

    #[test]
    fn overlong_and_surrogate_forms_are_rejected() {
        // 'A' 的两字节过长编码
        assert_eq!(decode(&[0xC1, 0x81], 0), (REPLACEMENT, 2));
        // U+D800
        assert_eq!(decode(&[0xED, 0xA0, 0x80], 0), (REPLACEMENT, 3));
        // 超出 U+10FFFF
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80], 0), (REPLACEMENT, 4));
    }

    #[test]
    fn out_of_range_offset_still_makes_progress() {
        assert_eq!(decode(b"", 0), (REPLACEMENT, 1));
        assert_eq!(decode(b"ab", 5), (REPLACEMENT, 1));
    }

    #[test]
    fn boundary_walks() {
        let text = "a世b".as_bytes();
        assert_eq!(next_boundary(text, 0), 1);
        assert_eq!(next_boundary(text, 1), 4);
        assert_eq!(next_boundary(text, 5), 5);
        assert_eq!(prev_boundary(text, 5), 4);
        assert_eq!(prev_boundary(text, 4), 1);
        assert_eq!(prev_boundary(text, 1), 0);
        assert_eq!(prev_boundary(text, 0), 0);
        assert!(is_boundary(text, 1));
        assert!(!is_boundary(text, 2));
        assert!(is_boundary(text, 5));
    }

    #[test]
    fn both_directions_agree_on_malformed_input() {
        // C0 80 是过长编码，后面多出一个续字节
        let bytes = [0xC0, 0x80, 0x80, b'a'];
        assert_eq!(next_boundary(&bytes, 0), 3);
        assert_eq!(prev_boundary(&bytes, 3), 0);
        assert_eq!(next_boundary(&bytes, 3), 4);
        assert_eq!(prev_boundary(&bytes, 4), 3);
    }

    #[test]
    fn prev_boundary_clamps_out_of_range_offsets() {
        assert_eq!(prev_boundary(b"", 5), 0);
        assert_eq!(prev_boundary(b"ab", 9), 1);
    }
}
