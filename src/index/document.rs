//! Line-oriented model of an index page.
//!
//! A page is a sequence of blocks: raw lines kept byte-for-byte, and date
//! sections of the form
//!
//! ```text
//! <div class="today">
//!   <div class="today-title">2026.03.02 전체 콘텐츠</div>
//!   <div class="today-grid" style="grid-template-columns:1fr; gap:10px;">
//!     <a ...>...</a>
//!   </div>
//! </div>
//! ```
//!
//! Sections keep the lines they were parsed from. Mutations splice single
//! lines into them, so markup no operation touched renders byte-for-byte.

use crate::domain::ContentDate;

use super::IndexError;

const SECTION_OPEN: &str = r#"<div class="today">"#;
const SECTION_OPEN_DEMOTED: &str = r#"<div class="today" style="padding-top:0;">"#;
const TITLE_OPEN: &str = r#"<div class="today-title">"#;
const GRID_OPEN_PREFIX: &str = r#"<div class="today-grid""#;
const DEFAULT_GRID_OPEN: &str =
    r#"<div class="today-grid" style="grid-template-columns:1fr; gap:10px;">"#;
const CLOSE: &str = "</div>";

/// Line index of the grid opening tag within a section
const GRID_OPEN_LINE: usize = 2;

/// Section-id convention of one family of index pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStyle {
    /// Indentation of newly created sections
    pub indent: &'static str,

    /// Text following the date in a section title
    pub title_suffix: &'static str,
}

/// One date-keyed section and its entry links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Date key
    pub date: ContentDate,

    /// Rendered with `padding-top:0` below the top section
    pub demoted: bool,

    /// Top-level children of the grid, trimmed. A child spanning several
    /// lines keeps them joined with `\n`.
    pub entries: Vec<String>,

    indent: String,
    entry_indent: String,
    lines: Vec<String>,
    grid_close: usize,
}

impl Section {
    /// A fresh, non-demoted section in the canonical layout
    pub fn new(date: ContentDate, style: &SectionStyle, entries: Vec<String>) -> Self {
        let i = style.indent;
        let entry_indent = format!("{}    ", i);

        let mut lines = vec![
            format!("{}{}", i, SECTION_OPEN),
            format!(
                "{}  {}{}{}{}",
                i,
                TITLE_OPEN,
                date.formatted(),
                style.title_suffix,
                CLOSE
            ),
            format!("{}  {}", i, DEFAULT_GRID_OPEN),
        ];
        lines.extend(entries.iter().map(|entry| format!("{}{}", entry_indent, entry)));
        let grid_close = lines.len();
        lines.push(format!("{}  {}", i, CLOSE));
        lines.push(format!("{}{}", i, CLOSE));

        Self {
            date,
            demoted: false,
            entries,
            indent: i.to_string(),
            entry_indent,
            lines,
            grid_close,
        }
    }

    fn push_entry(&mut self, entry: String) {
        self.lines
            .insert(self.grid_close, format!("{}{}", self.entry_indent, entry));
        self.grid_close += 1;
        self.entries.push(entry);
    }

    fn insert_entry_first(&mut self, entry: String) {
        self.lines
            .insert(GRID_OPEN_LINE + 1, format!("{}{}", self.entry_indent, entry));
        self.grid_close += 1;
        self.entries.insert(0, entry);
    }

    fn demote(&mut self) {
        if !self.demoted {
            self.lines[0] = format!("{}{}", self.indent, SECTION_OPEN_DEMOTED);
            self.demoted = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Raw(String),
    Section(Section),
}

/// Parsed index page
#[derive(Debug, Clone)]
pub struct IndexDocument {
    style: SectionStyle,
    eol: &'static str,
    blocks: Vec<Block>,
}

impl IndexDocument {
    /// Parse `content` using the section convention `style`.
    ///
    /// A page containing any CRLF is read and written with CRLF throughout.
    pub fn parse(content: &str, style: SectionStyle) -> Self {
        let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let lines: Vec<&str> = content
            .split('\n')
            .map(|line| {
                if eol == "\r\n" {
                    line.strip_suffix('\r').unwrap_or(line)
                } else {
                    line
                }
            })
            .collect();

        let mut blocks = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            match parse_section(&lines[i..], &style) {
                Some((section, consumed)) => {
                    blocks.push(Block::Section(section));
                    i += consumed;
                }
                None => {
                    blocks.push(Block::Raw(lines[i].to_string()));
                    i += 1;
                }
            }
        }

        Self { style, eol, blocks }
    }

    /// Serialize back to HTML
    pub fn render(&self) -> String {
        let mut out: Vec<&str> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Raw(line) => out.push(line.as_str()),
                Block::Section(section) => out.extend(section.lines.iter().map(String::as_str)),
            }
        }
        out.join(self.eol)
    }

    /// Sections in document order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Section(s) => Some(s),
            Block::Raw(_) => None,
        })
    }

    pub fn section(&self, date: &ContentDate) -> Option<&Section> {
        self.sections().find(|s| &s.date == date)
    }

    pub fn has_section(&self, date: &ContentDate) -> bool {
        self.section(date).is_some()
    }

    fn section_mut(&mut self, date: &ContentDate) -> Result<&mut Section, IndexError> {
        self.blocks
            .iter_mut()
            .find_map(|b| match b {
                Block::Section(s) if &s.date == date => Some(s),
                _ => None,
            })
            .ok_or_else(|| IndexError::SectionNotFound {
                date: date.formatted(),
            })
    }

    /// Add `entry` as the last child of the grid for `date`
    pub fn append_entry(&mut self, date: &ContentDate, entry: String) -> Result<(), IndexError> {
        self.section_mut(date)?.push_entry(entry);
        Ok(())
    }

    /// Add `entry` as the first child of the grid for `date`
    pub fn prepend_entry(&mut self, date: &ContentDate, entry: String) -> Result<(), IndexError> {
        self.section_mut(date)?.insert_entry_first(entry);
        Ok(())
    }

    /// Insert a new section for `date` ahead of every existing section,
    /// followed by a blank line
    pub fn insert_first_section(
        &mut self,
        date: ContentDate,
        entries: Vec<String>,
    ) -> Result<(), IndexError> {
        let pos = self
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Section(_)))
            .ok_or(IndexError::NoSections)?;

        let section = Section::new(date, &self.style, entries);
        self.blocks.insert(pos, Block::Raw(String::new()));
        self.blocks.insert(pos, Block::Section(section));
        Ok(())
    }

    /// Mark the top section as demoted. Returns its date, if there is one.
    pub fn demote_first(&mut self) -> Option<ContentDate> {
        self.blocks.iter_mut().find_map(|b| match b {
            Block::Section(s) => {
                s.demote();
                Some(s.date.clone())
            }
            Block::Raw(_) => None,
        })
    }

    /// Raw lines outside of sections
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Raw(line) => Some(line.as_str()),
            Block::Section(_) => None,
        })
    }

    /// Replace `from` with `to` in every raw line; returns the number of
    /// lines changed
    pub fn replace_in_raw(&mut self, from: &str, to: &str) -> usize {
        let mut changed = 0;
        for block in &mut self.blocks {
            if let Block::Raw(line) = block {
                if line.contains(from) {
                    *line = line.replace(from, to);
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// Net `<div` nesting opened by one line
fn div_balance(line: &str) -> i64 {
    line.matches("<div").count() as i64 - line.matches(CLOSE).count() as i64
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Try to read a section starting at `lines[0]`. Returns the section and the
/// number of lines it spans.
///
/// The grid closes at the first bare `</div>` with no nested `<div>` open.
/// Unbalanced nesting makes the block raw.
fn parse_section(lines: &[&str], style: &SectionStyle) -> Option<(Section, usize)> {
    let open = lines.first()?.trim_end();
    let trimmed = open.trim_start();
    let demoted = match trimmed {
        SECTION_OPEN => false,
        SECTION_OPEN_DEMOTED => true,
        _ => return None,
    };
    let indent = leading_whitespace(open);

    let title = lines
        .get(1)?
        .trim()
        .strip_prefix(TITLE_OPEN)?
        .strip_suffix(CLOSE)?;
    let date = ContentDate::from_formatted(title.strip_suffix(style.title_suffix)?)?;

    if !lines.get(GRID_OPEN_LINE)?.trim().starts_with(GRID_OPEN_PREFIX) {
        return None;
    }

    let mut entries = Vec::new();
    let mut entry_indent = None;
    let mut pending: Vec<&str> = Vec::new();
    let mut depth: i64 = 0;
    let mut j = GRID_OPEN_LINE + 1;

    let grid_close = loop {
        let raw = *lines.get(j)?;
        let line = raw.trim();

        if depth == 0 {
            if line == CLOSE {
                break j;
            }
            if line.is_empty() {
                j += 1;
                continue;
            }
            if entry_indent.is_none() {
                entry_indent = Some(leading_whitespace(raw).to_string());
            }
        }

        pending.push(line);
        depth += div_balance(line);
        if depth < 0 {
            return None;
        }
        if depth == 0 {
            entries.push(pending.join("\n"));
            pending.clear();
        }
        j += 1;
    };

    if lines.get(grid_close + 1)?.trim() != CLOSE {
        return None;
    }
    let consumed = grid_close + 2;

    Some((
        Section {
            date,
            demoted,
            entries,
            indent: indent.to_string(),
            entry_indent: entry_indent.unwrap_or_else(|| format!("{}    ", indent)),
            lines: lines[..consumed].iter().map(|line| line.to_string()).collect(),
            grid_close,
        },
        consumed,
    ))
}
