use colored::*;
use readyr_common::config::Config;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::format::Detail;
use crate::terminal::{colors, logging::PRINT_TARGET};

pub const TOTAL_WIDTH: usize = 64;

/// Key column width of the tree rows under an endpoint.
const DETAIL_KEY_WIDTH: usize = 7;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// Centers `title` in a line of `fill`, `TOTAL_WIDTH` columns wide.
fn rule(fill: &str, title: &str) -> (String, String) {
    let free: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title));
    let left: usize = free / 2;
    (fill.repeat(left), fill.repeat(free - left))
}

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 {
        return;
    }

    let title: String = format!("⟦ READYR v{} ⟧", env!("CARGO_PKG_VERSION"));
    let (left, right) = rule("═", &title);
    print(&format!(
        "{}{}{}",
        left.color(colors::SEPARATOR),
        title.color(colors::PRIMARY).bold(),
        right.color(colors::SEPARATOR)
    ));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let (left, right) = rule("─", &title);
    print(&format!(
        "{}{}{}",
        left.color(colors::SEPARATOR),
        title.color(colors::PRIMARY),
        right.color(colors::SEPARATOR)
    ));
}

pub fn fat_separator() {
    let (left, right) = rule("═", "");
    print(&format!("{left}{right}").color(colors::SEPARATOR).to_string());
}

/// Prints `key....: value` rows with the colons lined up.
pub fn key_values(rows: &[(&str, String)]) {
    let width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        let dots: String = ".".repeat(width + 1 - key.len());
        print(&format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value.color(colors::TEXT_DEFAULT)
        ));
    }
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(details: Vec<Detail>) {
    let count: usize = details.len();
    for (i, (key, value)) in details.into_iter().enumerate() {
        let branch: &str = if i + 1 == count { "└─" } else { "├─" };
        let dots: String = ".".repeat(DETAIL_KEY_WIDTH.saturating_sub(key.len()));
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// Pads `msg` to the middle of the output width, ignoring color codes.
fn centered(msg: &str) -> String {
    let pad: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    format!("{pad}{msg}")
}

pub fn centerln(msg: &str) {
    print(&centered(msg));
}

pub fn end_of_program() {
    fat_separator();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
