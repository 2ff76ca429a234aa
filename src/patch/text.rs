// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Small scanning helpers for brace-delimited and line-oriented text.

use std::ops::Range;

use regex::Regex;

/// Index of the `}` matching the `{` at `open`.
///
/// Quoted strings and comments are skipped, so braces inside
/// `"${project.ext.x}"` or `// }` do not disturb the count.
#[must_use]
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// A `name {` … `}` block located in a larger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Start of the header, e.g. the `r` of `release {`.
    pub header: usize,
    /// Index of the opening brace.
    pub open: usize,
    /// Index of the closing brace.
    pub close: usize,
}

impl Block {
    /// Everything between the braces.
    #[must_use]
    pub const fn body(&self) -> Range<usize> {
        self.open + 1..self.close
    }
}

/// First block whose header matches `header` inside `within`.
///
/// `header` must end with `\{` so the match ends at the opening brace.
#[must_use]
pub fn find_block(text: &str, header: &Regex, within: Range<usize>) -> Option<Block> {
    let offset = within.start;
    let found = header.find(text.get(within)?)?;
    let open = offset + found.end() - 1;
    let close = matching_brace(text, open)?;
    Some(Block {
        header: offset + found.start(),
        open,
        close,
    })
}

/// Byte offset of the start of the line containing `pos`.
#[must_use]
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `pos`.
#[must_use]
pub fn indent_at(text: &str, pos: usize) -> &str {
    let start = line_start(text, pos);
    let line = &text[start..];
    let width = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..width]
}

/// Prefixes every line with `base` and joins them with newlines.
#[must_use]
pub fn indent_lines(lines: &[String], base: &str) -> String {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{base}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inserts `block` on its own line right after `pos`.
#[must_use]
pub fn insert_after(text: &str, pos: usize, block: &str) -> String {
    let mut out = String::with_capacity(text.len() + block.len() + 1);
    out.push_str(&text[..pos]);
    out.push('\n');
    out.push_str(block);
    out.push_str(&text[pos..]);
    out
}

/// Inserts `block` on its own line(s) before the token at `pos`.
///
/// When the token starts its line the block goes above that line. Otherwise
/// the token is pushed onto a fresh line with its original indentation.
#[must_use]
pub fn insert_before(text: &str, pos: usize, block: &str) -> String {
    let start = line_start(text, pos);
    let mut out = String::with_capacity(text.len() + block.len() + 2);
    if text[start..pos].trim().is_empty() {
        out.push_str(&text[..start]);
        out.push_str(block);
        out.push('\n');
        out.push_str(&text[start..]);
    } else {
        let indent = indent_at(text, pos).to_string();
        out.push_str(&text[..pos]);
        out.push('\n');
        out.push_str(block);
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&text[pos..]);
    }
    out
}

/// Single-quoted Groovy string literal.
#[must_use]
pub fn groovy_quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Escapes a value for use inside a double-quoted XML attribute.
#[must_use]
pub fn xml_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
