use proptest::prelude::*;

use sift_core::{
    buffer::{Direction, EditBuffer},
    matcher::{MatchList, Matcher, Ranking},
    model::CandidateStore,
    paginator::{Layout, Paginator, TextMeasure},
    selection::Selection,
    utf8,
};

struct CharCount;

impl TextMeasure for CharCount {
    fn width(&self, text: &str) -> usize {
        text.chars().count().max(1)
    }
}

#[derive(Debug, Clone)]
enum Edit {
    Insert(String),
    Raw(Vec<u8>),
    Move(Direction),
    Word(Direction),
    Backspace,
    Delete,
    KillWord,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Left), Just(Direction::Right)]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[a-c é世🦀]{0,4}".prop_map(Edit::Insert),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(Edit::Raw),
        direction().prop_map(Edit::Move),
        direction().prop_map(Edit::Word),
        Just(Edit::Backspace),
        Just(Edit::Delete),
        Just(Edit::KillWord),
    ]
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc ]{0,6}", 0..24)
}

fn store_of(lines: &[String]) -> CandidateStore {
    lines.iter().cloned().collect()
}

proptest! {
    #[test]
    fn cursor_stays_on_code_point_boundaries(edits in prop::collection::vec(edit(), 0..40)) {
        let mut buffer = EditBuffer::new(32, b' ');
        for edit in edits {
            match edit {
                Edit::Insert(text) => { let _ = buffer.insert(text.as_bytes()); }
                Edit::Raw(bytes) => { let _ = buffer.insert(&bytes); }
                Edit::Move(d) => { buffer.move_cursor(d); }
                Edit::Word(d) => { buffer.move_word_edge(d); }
                Edit::Backspace => { buffer.backspace(); }
                Edit::Delete => { buffer.delete(); }
                Edit::KillWord => { buffer.kill_word(); }
            }
            prop_assert!(utf8::is_boundary(buffer.as_bytes(), buffer.cursor()));
            prop_assert!(buffer.len() <= buffer.capacity());
        }
    }

    #[test]
    fn left_and_right_walks_visit_the_same_boundaries(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        let mut forward = vec![0];
        let mut pos = 0;
        while pos < bytes.len() {
            pos = utf8::next_boundary(&bytes, pos);
            prop_assert!(utf8::is_boundary(&bytes, pos));
            forward.push(pos);
        }
        let mut backward = vec![bytes.len()];
        let mut pos = bytes.len();
        while pos > 0 {
            pos = utf8::prev_boundary(&bytes, pos);
            backward.push(pos);
        }
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn decode_always_makes_progress(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
        let mut offset = 0;
        while offset < bytes.len() {
            let (_, consumed) = utf8::decode(&bytes, offset);
            prop_assert!((1..=4).contains(&consumed));
            offset += consumed;
        }
    }

    #[test]
    fn decode_agrees_with_std_on_valid_text(text in "\\PC{1,8}") {
        let bytes = text.as_bytes();
        let mut offset = 0;
        for expected in text.chars() {
            let (ch, consumed) = utf8::decode(bytes, offset);
            prop_assert_eq!(ch, expected);
            prop_assert_eq!(consumed, expected.len_utf8());
            offset += consumed;
        }
    }

    #[test]
    fn substring_survivors_are_token_and_closed(lines in lines(), query in "[abc ]{0,5}") {
        let mut store = store_of(&lines);
        let list = Matcher::new(Ranking::Substring, true, b' ').rebuild(query.as_bytes(), &mut store);
        let tokens: Vec<&str> = query.split(' ').filter(|t| !t.is_empty()).collect();
        let expected: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| tokens.iter().all(|t| line.contains(t)))
            .map(|(i, _)| i)
            .collect();
        let mut survivors = list.as_slice().to_vec();
        survivors.sort_unstable();
        prop_assert_eq!(survivors, expected);
    }

    #[test]
    fn substring_tiers_preserve_store_order(lines in lines(), query in "[abc ]{1,5}") {
        let mut store = store_of(&lines);
        let list = Matcher::new(Ranking::Substring, true, b' ').rebuild(query.as_bytes(), &mut store);
        let first = query.split(' ').find(|t| !t.is_empty()).unwrap_or("");
        let tier = |i: usize| {
            let text = &lines[i];
            if first.is_empty() || *text == query { 0 } else if text.starts_with(first) { 1 } else { 2 }
        };
        for pair in list.as_slice().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(tier(a) < tier(b) || (tier(a) == tier(b) && a < b));
        }
    }

    #[test]
    fn fuzzy_order_is_stable_by_score(lines in lines(), query in "[abc]{1,3}") {
        let mut store = store_of(&lines);
        let list = Matcher::new(Ranking::Fuzzy, true, b' ').rebuild(query.as_bytes(), &mut store);
        for pair in list.as_slice().windows(2) {
            let a = store.get(pair[0]).unwrap().score;
            let b = store.get(pair[1]).unwrap().score;
            prop_assert!(a < b || (a == b && pair[0] < pair[1]));
        }
        // 存活者恰好是包含查询子序列的候选
        for (i, line) in lines.iter().enumerate() {
            let mut rest = query.chars().peekable();
            for c in line.chars() {
                if rest.peek() == Some(&c) {
                    rest.next();
                }
            }
            prop_assert_eq!(rest.peek().is_none(), list.as_slice().contains(&i));
        }
    }

    #[test]
    fn budget_window_never_overflows(
        lines in prop::collection::vec("[a-z]{0,12}", 1..30),
        budget in 1usize..16,
        anchor_seed in any::<usize>(),
    ) {
        let store = store_of(&lines);
        let list = MatchList::all(store.len());
        let pager = Paginator::new(Layout::Budget(budget), CharCount);
        let anchor = anchor_seed % list.len();
        let offsets = pager.calc_offsets(&list, &store, anchor);
        let window = pager.window(&list, anchor, offsets);
        prop_assert!(!window.is_empty());
        let total: usize = window.clone().map(|p| CharCount.width(&lines[p])).sum();
        prop_assert!(total <= budget || window.len() == 1);
        if let Some(prev) = offsets.prev {
            let back: usize = (prev..anchor).map(|p| CharCount.width(&lines[p]).min(budget)).sum();
            prop_assert!(back <= budget);
        }
    }

    #[test]
    fn navigation_keeps_current_inside_window(
        count in 1usize..40,
        lines_per_page in 1usize..6,
        moves in prop::collection::vec(0u8..6, 0..60),
    ) {
        let store: CandidateStore = (0..count).map(|i| format!("item{i}")).collect();
        let list = MatchList::all(count);
        let pager = Paginator::new(Layout::Lines(lines_per_page), CharCount);
        let calc = |anchor: usize| pager.calc_offsets(&list, &store, anchor);
        let mut selection = Selection::default();
        selection.reset(count, &calc);
        for m in moves {
            match m {
                0 => { selection.move_next(&calc); }
                1 => { selection.move_prev(&calc); }
                2 => { selection.page_next(&calc); }
                3 => { selection.page_prev(&calc); }
                4 => { selection.jump_start(&calc); }
                _ => { selection.jump_end(&calc); }
            }
            let current = selection.current().unwrap();
            let window = selection.window();
            prop_assert!(window.contains(&current));
            prop_assert!(window.len() <= lines_per_page);
        }
    }
}

#[test]
fn word_left_twice_reaches_previous_word() {
    let mut buffer = EditBuffer::new(64, b' ');
    buffer.insert(b"one two three").unwrap();
    buffer.move_cursor(Direction::Left);
    buffer.move_cursor(Direction::Left);
    buffer.move_word_edge(Direction::Left);
    assert_eq!(buffer.cursor(), 8);
    buffer.move_word_edge(Direction::Left);
    assert_eq!(buffer.cursor(), 4);
}
