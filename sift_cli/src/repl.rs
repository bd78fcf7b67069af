//! 行式交互：每行输入要么是要键入的文本，要么是 `:` 开头的命令。
//!
//! 界面画到 stderr，确认结果写到 stdout，方便在管道中使用。
use std::io::{self, BufRead, Write};

use sift_core::{
    key_event::{Action, ExitStatus, InputEvent},
    model::UiState,
    paginator::TextMeasure,
    session::Session,
};

pub const HELP: &str = "\
直接输入文本：追加到查询串（以 :: 开头可输入字面的 :）
空行 / :enter   输出选中项并退出
:raw            输出原始查询串并退出
:keep           输出选中项但不退出（标记该项）
:q / :quit      放弃
:up :down :pgup :pgdn :home :end :left :right
:wleft :wright  按词移动光标
:bs :del        删除光标前/后一个字符
:kill :ukill    删除到行尾 / 行首
:wkill          删除前一个词
:clear          清空查询串
:tab            用选中项替换查询串
:help           显示本帮助";

/// 解析后的一行输入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Events(Vec<InputEvent>),
    Help,
}

/// 解析一行输入；未知命令返回错误信息。
pub fn parse_line(line: &str) -> Result<Command, String> {
    if line.is_empty() {
        return Ok(Command::Events(vec![InputEvent::Confirm {
            raw: false,
            keep_open: false,
        }]));
    }
    if let Some(literal) = line.strip_prefix("::") {
        return Ok(Command::Events(vec![InputEvent::Insert(format!(":{literal}"))]));
    }
    let Some(name) = line.strip_prefix(':') else {
        return Ok(Command::Events(vec![InputEvent::Insert(line.to_string())]));
    };
    let event = match name.trim() {
        "help" | "h" => return Ok(Command::Help),
        "enter" => InputEvent::Confirm {
            raw: false,
            keep_open: false,
        },
        "raw" => InputEvent::Confirm {
            raw: true,
            keep_open: false,
        },
        "keep" => InputEvent::Confirm {
            raw: false,
            keep_open: true,
        },
        "q" | "quit" => InputEvent::Cancel,
        "up" => InputEvent::Up,
        "down" => InputEvent::Down,
        "pgup" => InputEvent::PageUp,
        "pgdn" => InputEvent::PageDown,
        "home" => InputEvent::Home,
        "end" => InputEvent::End,
        "left" => InputEvent::Left,
        "right" => InputEvent::Right,
        "wleft" => InputEvent::WordLeft,
        "wright" => InputEvent::WordRight,
        "bs" => InputEvent::Backspace,
        "del" => InputEvent::Delete,
        "kill" => InputEvent::KillToEnd,
        "ukill" => InputEvent::KillToStart,
        "wkill" => InputEvent::KillWord,
        "clear" => InputEvent::Clear,
        "tab" => InputEvent::Complete,
        other => return Err(format!("未知命令 :{other}（输入 :help 查看命令）")),
    };
    Ok(Command::Events(vec![event]))
}

/// 把 UI 快照画成文本。
///
/// 纵向：第一行是输入框，之后每行一个候选（`>` 选中，`*` 已输出过）。
/// 横向：输入框后面跟一行候选，`<`/`>` 表示前后还有。
pub fn draw(ui: &UiState, prompt: &str, vertical: bool) -> String {
    let mut out = String::new();
    if !prompt.is_empty() {
        out.push_str(prompt);
        out.push(' ');
    }
    out.push_str(&ui.before_cursor);
    out.push('|');
    out.push_str(&ui.after_cursor);

    if vertical {
        for item in &ui.page {
            let mark = if item.selected {
                '>'
            } else if item.marked {
                '*'
            } else {
                ' '
            };
            out.push('\n');
            out.push(mark);
            out.push(' ');
            out.push_str(&item.text);
        }
    } else if !ui.page.is_empty() {
        out.push_str("  ");
        if ui.has_prev {
            out.push('<');
        }
        for item in &ui.page {
            let (open, close) = match (item.selected, item.marked) {
                (true, _) => ('[', ']'),
                (false, true) => ('*', '*'),
                (false, false) => (' ', ' '),
            };
            out.push(open);
            out.push_str(&item.text);
            out.push(close);
        }
        if ui.has_next {
            out.push('>');
        }
    }
    out.push_str(&format!("\n({} 项匹配)", ui.match_count));
    out
}

/// 运行交互循环，直到确认、放弃或输入结束（视为放弃）。
pub fn run<M: TextMeasure>(
    session: &mut Session<M>,
    prompt: &str,
    input: &mut dyn BufRead,
    screen: &mut dyn Write,
    output: &mut dyn Write,
) -> io::Result<ExitStatus> {
    let vertical = session.layout().is_vertical();
    writeln!(screen, "{}", draw(&session.ui_state(), prompt, vertical))?;
    screen.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::debug!("command input closed");
            return Ok(ExitStatus::Cancelled);
        }
        let events = match parse_line(line.trim_end_matches(['\n', '\r'])) {
            Ok(Command::Events(events)) => events,
            Ok(Command::Help) => {
                writeln!(screen, "{HELP}")?;
                continue;
            }
            Err(msg) => {
                writeln!(screen, "{msg}")?;
                continue;
            }
        };

        let mut ui = None;
        for event in events {
            let (state, actions) = session.handle(event);
            for action in actions {
                match action {
                    Action::Emit(text) => {
                        writeln!(output, "{text}")?;
                        output.flush()?;
                    }
                    Action::Exit(status) => return Ok(status),
                }
            }
            ui = Some(state);
        }
        if let Some(ui) = ui {
            writeln!(screen, "{}", draw(&ui, prompt, vertical))?;
            screen.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use sift_core::{config::Config, model::CandidateStore, paginator::Layout};
    use sift_measure::CharCount;

    use super::*;

    fn session(layout: Layout, lines: &[&str]) -> Session<CharCount> {
        let store: CandidateStore = lines.iter().copied().collect();
        Session::new(&Config::default().layout(layout), CharCount, store).unwrap()
    }

    fn script(session: &mut Session<CharCount>, input: &str) -> (ExitStatus, String, String) {
        let mut screen = Vec::new();
        let mut output = Vec::new();
        let status = run(
            session,
            "",
            &mut Cursor::new(input.as_bytes()),
            &mut screen,
            &mut output,
        )
        .unwrap();
        (
            status,
            String::from_utf8(screen).unwrap(),
            String::from_utf8(output).unwrap(),
        )
    }

    #[test]
    fn parses_text_and_commands() {
        assert_eq!(
            parse_line("foo"),
            Ok(Command::Events(vec![InputEvent::Insert("foo".into())]))
        );
        assert_eq!(
            parse_line("::x"),
            Ok(Command::Events(vec![InputEvent::Insert(":x".into())]))
        );
        assert_eq!(
            parse_line(":pgdn"),
            Ok(Command::Events(vec![InputEvent::PageDown]))
        );
        assert_eq!(
            parse_line(""),
            Ok(Command::Events(vec![InputEvent::Confirm {
                raw: false,
                keep_open: false
            }]))
        );
        assert_eq!(parse_line(":help"), Ok(Command::Help));
        assert!(parse_line(":nope").is_err());
    }

    #[test]
    fn draws_vertical_list() {
        let s = session(Layout::Lines(3), &["one", "two", "three", "four"]);
        assert_eq!(
            draw(&s.ui_state(), "run:", true),
            "run: |\n> one\n  two\n  three\n(4 项匹配)"
        );
    }

    #[test]
    fn draws_horizontal_list_with_arrows() {
        let mut s = session(Layout::Budget(6), &["aaa", "bb", "cccc"]);
        s.handle(InputEvent::PageDown);
        s.handle(InputEvent::Insert("c".into()));
        s.handle(InputEvent::Left);
        assert_eq!(draw(&s.ui_state(), "", false), "|c  [cccc]\n(1 项匹配)");

        let s = session(Layout::Budget(6), &["aaa", "bb", "cccc"]);
        assert_eq!(draw(&s.ui_state(), "", false), "|  [aaa] bb >\n(3 项匹配)");
    }

    #[test]
    fn typing_then_enter_prints_selection() {
        let mut s = session(Layout::Lines(5), &["firefox", "chromium", "fish"]);
        let (status, _, output) = script(&mut s, "fi\n:down\n\n");
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(output, "fish\n");
    }

    #[test]
    fn keep_open_prints_several_lines() {
        let mut s = session(Layout::Lines(5), &["a", "b"]);
        let (status, screen, output) = script(&mut s, ":keep\n:down\n:keep\n:q\n");
        assert_eq!(status, ExitStatus::Cancelled);
        assert_eq!(output, "a\nb\n");
        assert!(screen.contains("* a"));
    }

    #[test]
    fn end_of_input_cancels() {
        let mut s = session(Layout::Lines(5), &["a"]);
        let (status, _, output) = script(&mut s, "a\n:bogus\n");
        assert_eq!(status, ExitStatus::Cancelled);
        assert!(output.is_empty());
    }
}
