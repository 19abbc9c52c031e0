//! UI utilities for command output.
//!
//! Every helper writes to a caller-supplied stream: listings go to stdout, while
//! attach reports move to stderr whenever session documents own stdout.

use crossterm::style::Stylize;
use std::io::{self, Write};

const HEADER_WIDTH: usize = 58;

/// Terminal cell width: ASCII is one cell, CJK and emoji take two.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

/// Boxed, centered title.
pub fn write_header(out: &mut dyn Write, title: &str) -> io::Result<()> {
    let padding = HEADER_WIDTH.saturating_sub(display_width(title));
    let left = padding / 2;
    let bar = "═".repeat(HEADER_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", format!("╔{}╗", bar).dark_cyan())?;
    writeln!(
        out,
        "{}",
        format!("║{:left$}{}{:right$}║", "", title, "", left = left, right = padding - left).dark_cyan()
    )?;
    writeln!(out, "{}", format!("╚{}╝", bar).dark_cyan())?;
    writeln!(out)
}

/// Section title followed by a rule.
pub fn write_section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {} {}", "▸".dark_cyan(), title.white().bold())?;
    writeln!(out, "  {}", "─".repeat(50).dark_grey())
}

/// 单行状态消息的前缀符号。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Success,
    Error,
    Warning,
    Info,
    Hint,
}

pub fn write_mark(out: &mut dyn Write, mark: Mark, msg: &str) -> io::Result<()> {
    match mark {
        Mark::Success => writeln!(out, "  {} {}", "✓".green(), msg),
        Mark::Error => writeln!(out, "  {} {}", "✗".red(), msg),
        Mark::Warning => writeln!(out, "  {} {}", "⚠".yellow(), msg),
        Mark::Info => writeln!(out, "  {} {}", "ℹ".blue(), msg),
        Mark::Hint => writeln!(out, "  {} {}", "💡".yellow(), msg.dark_grey()),
    }
}

pub fn write_kv(out: &mut dyn Write, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<14} {}", format!("{}:", key).dark_grey(), value)
}

/// Column titles with an underline sized to each column.
pub fn write_table_header(out: &mut dyn Write, columns: &[(&str, usize)]) -> io::Result<()> {
    let mut titles = Vec::with_capacity(columns.len());
    let mut rules = Vec::with_capacity(columns.len());
    for (name, width) in columns {
        titles.push(format!("{:<width$}", name, width = width));
        rules.push("─".repeat(*width));
    }
    writeln!(out, "  {}", titles.join(" ").white().bold())?;
    writeln!(out, "  {}", rules.join(" ").dark_grey())
}

pub fn write_empty(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "\n  {}\n", msg.dark_grey().italic())
}

/// 按字符截断，避免多字节字符边界问题。
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!(
            "{}...",
            value.chars().take(max.saturating_sub(3)).collect::<String>()
        )
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("服务"), 4);
    }

    #[test]
    fn truncate_by_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-replica-name", 10), "a-very-...");
    }

    #[test]
    fn header_is_boxed_and_centered() {
        let text = render(|out| write_header(out, "ATTACH"));
        assert!(text.contains("ATTACH"));
        assert!(text.contains(&"═".repeat(HEADER_WIDTH)));
        assert!(text.contains(&format!("{}ATTACH{}", " ".repeat(26), " ".repeat(26))));
    }

    #[test]
    fn helpers_write_to_given_stream() {
        let text = render(|out| {
            write_kv(out, "Type", "project")?;
            write_mark(out, Mark::Info, "api_2 skipped")
        });
        assert!(text.contains("project"));
        assert!(text.contains("api_2 skipped"));
    }
}
