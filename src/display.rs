// Presentation metadata for ranked results: display paths, width-aware
// truncation, and match highlighting. None of this affects ranking.

use ansi_term::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::search::{MatchedField, RankedResult};
use crate::settings::Settings;
use crate::workspace::{FileRef, Leaf};

/// A styled result line with its visual width, so the UI shell can lay out
/// the list without re-measuring ANSI text.
#[derive(Debug, Clone, Default)]
pub struct ResultLine {
    /// ANSI-styled text content
    pub part: String,
    /// Visual width in columns
    pub len: usize,
}

/// The path string shown under a result. With `include_file_name` off, the
/// trailing file-name segment is dropped; root-level files then show
/// nothing.
pub fn display_path(file: &FileRef, include_file_name: bool) -> String {
    if include_file_name {
        return file.path.clone();
    }
    match file.path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Width-aware middle truncation: keep the head and tail of the string and
/// elide the middle so the result fits `max_cols` columns.
pub fn truncate_middle(s: &str, max_cols: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    if max_cols == 1 {
        return "…".to_string();
    }

    let head_budget = (max_cols - 1) / 2;
    let tail_budget = max_cols - 1 - head_budget;

    let mut head = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > head_budget {
            break;
        }
        head.push(c);
        used += w;
    }

    let mut tail_rev: Vec<char> = Vec::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > tail_budget {
            break;
        }
        tail_rev.push(c);
        used += w;
    }

    let tail: String = tail_rev.into_iter().rev().collect();
    format!("{}…{}", head, tail)
}

/// Emphasize matched char ranges (exclusive end, ascending, non-overlapping
/// as the ranker produces them). Out-of-range spans are clamped.
pub fn highlight_spans(text: &str, spans: &[(usize, usize)]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    let style = Style::new().bold();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut pos = 0;

    for &(start, end) in spans {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > pos {
            out.extend(&chars[pos..start]);
        }
        if end > start {
            let seg: String = chars[start..end].iter().collect();
            out.push_str(&style.paint(seg).to_string());
        }
        pos = pos.max(end);
    }
    if pos < chars.len() {
        out.extend(&chars[pos..]);
    }
    out
}

/// Build the styled line for one ranked result: highlighted basename, plus
/// the (dimmed, truncated) display path when the settings ask for it.
pub fn result_line(
    leaf: &Leaf,
    result: &RankedResult,
    settings: &Settings,
    max_cols: usize,
) -> ResultLine {
    let file = match leaf.bound_file() {
        Some(f) => f,
        None => return ResultLine::default(),
    };

    let name_width = UnicodeWidthStr::width(file.basename.as_str());
    let mut part = if result.matched_field == MatchedField::Name {
        highlight_spans(&file.basename, &result.spans)
    } else {
        file.basename.clone()
    };
    let mut len = name_width;

    if settings.show_file_path {
        let path = display_path(file, settings.include_file_name_in_path);
        let budget = max_cols.saturating_sub(name_width + 2);
        if !path.is_empty() && budget > 0 {
            let shown = truncate_middle(&path, budget);
            len += 2 + UnicodeWidthStr::width(shown.as_str());
            part.push_str("  ");
            part.push_str(&Style::new().dimmed().paint(shown).to_string());
        }
    }

    ResultLine { part, len }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MatchTier;
    use crate::workspace::LeafId;

    fn file(path: &str, basename: &str) -> FileRef {
        FileRef {
            path: path.to_string(),
            basename: basename.to_string(),
            aliases: vec![],
            tags: vec![],
        }
    }

    fn leaf(path: &str, basename: &str) -> Leaf {
        Leaf {
            id: LeafId(1),
            view_type: "markdown".to_string(),
            file: Some(file(path, basename)),
            deferred: false,
        }
    }

    fn name_result(spans: Vec<(usize, usize)>) -> RankedResult {
        RankedResult {
            index: 0,
            id: LeafId(1),
            score: 0,
            matched_field: MatchedField::Name,
            tier: Some(MatchTier::Prefix),
            spans,
        }
    }

    #[test]
    fn test_display_path_with_file_name() {
        let f = file("notes/daily/today.md", "today");
        assert_eq!(display_path(&f, true), "notes/daily/today.md");
    }

    #[test]
    fn test_display_path_without_file_name() {
        let f = file("notes/daily/today.md", "today");
        assert_eq!(display_path(&f, false), "notes/daily");
    }

    #[test]
    fn test_display_path_root_file() {
        let f = file("today.md", "today");
        assert_eq!(display_path(&f, false), "");
        assert_eq!(display_path(&f, true), "today.md");
    }

    #[test]
    fn test_truncate_middle_fits() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_middle_elides() {
        let out = truncate_middle("a/very/long/path/to/note.md", 12);
        assert!(out.contains('…'));
        assert!(UnicodeWidthStr::width(out.as_str()) <= 12);
        assert!(out.starts_with("a/ver"));
        assert!(out.ends_with("te.md"));
    }

    #[test]
    fn test_truncate_middle_tiny_budget() {
        assert_eq!(truncate_middle("whatever", 1), "…");
        assert_eq!(truncate_middle("whatever", 0), "");
    }

    #[test]
    fn test_highlight_spans_empty() {
        assert_eq!(highlight_spans("plain", &[]), "plain");
    }

    #[test]
    fn test_highlight_spans_bold_segment() {
        let expected = format!("a{}c", Style::new().bold().paint("b"));
        assert_eq!(highlight_spans("abc", &[(1, 2)]), expected);
    }

    #[test]
    fn test_highlight_spans_clamped() {
        // Spans past the end of the text must not panic
        let out = highlight_spans("ab", &[(1, 99)]);
        assert!(out.contains('a'));
        assert!(out.contains('b'));
    }

    #[test]
    fn test_result_line_name_only() {
        let l = leaf("notes/today.md", "today");
        let mut settings = Settings::default();
        settings.show_file_path = false;
        let line = result_line(&l, &name_result(vec![(0, 2)]), &settings, 80);
        assert_eq!(line.len, 5);
        assert!(line.part.contains("\u{1b}["));
    }

    #[test]
    fn test_result_line_with_path() {
        let l = leaf("notes/today.md", "today");
        let settings = Settings::default();
        let line = result_line(&l, &name_result(vec![]), &settings, 80);
        assert!(line.len > 5);
        assert!(line.part.contains("notes/today.md"));
    }

    #[test]
    fn test_result_line_path_omits_file_name() {
        let l = leaf("notes/today.md", "today");
        let mut settings = Settings::default();
        settings.include_file_name_in_path = false;
        let line = result_line(&l, &name_result(vec![]), &settings, 80);
        assert!(line.part.contains("notes"));
        assert!(!line.part.contains("notes/today.md"));
    }

    #[test]
    fn test_result_line_unbound_leaf() {
        let l = Leaf {
            id: LeafId(1),
            view_type: "empty".to_string(),
            file: None,
            deferred: false,
        };
        let line = result_line(&l, &name_result(vec![]), &Settings::default(), 80);
        assert!(line.part.is_empty());
        assert_eq!(line.len, 0);
    }
}
