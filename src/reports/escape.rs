//! Escaping utilities for text reports.
//!
//! Vehicle names, notes and body types come straight from input files and
//! may contain characters that break Markdown tables or CSV rows. Escape
//! them before embedding.

/// Escape a string for safe inclusion in Markdown table cells.
///
/// Pipes would split the cell; newlines would end the row.
///
/// # Examples
///
/// ```
/// use autorank::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("Civic | Sport"), "Civic \\| Sport");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for Markdown inline content such as headings and list items.
///
/// # Examples
///
/// ```
/// use autorank::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("*new* model"), "\\*new\\* model");
/// ```
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for a double-quoted CSV field.
///
/// Quotes are doubled per RFC 4180 and newlines flattened.
///
/// # Examples
///
/// ```
/// use autorank::reports::escape::escape_csv;
///
/// assert_eq!(escape_csv("the \"good\" one"), "the \"\"good\"\" one");
/// ```
pub fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\n', '\r'], " ")
}

/// Escape an optional Markdown table cell, returning "-" for None.
pub fn escape_md_opt(s: Option<&str>) -> String {
    match s {
        Some(v) => escape_markdown_table(v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escaping_keeps_plain_text() {
        assert_eq!(escape_markdown_table("2024 Toyota Camry"), "2024 Toyota Camry");
        assert_eq!(escape_markdown_table("a\r\nb"), "a b");
    }

    #[test]
    fn test_inline_escaping() {
        assert_eq!(escape_markdown_inline("# <Model>"), "\\# \\<Model\\>");
    }

    #[test]
    fn test_csv_escaping_flattens_lines() {
        assert_eq!(escape_csv("one\ntwo"), "one two");
    }

    #[test]
    fn test_md_opt() {
        assert_eq!(escape_md_opt(None), "-");
        assert_eq!(escape_md_opt(Some("SUV")), "SUV");
    }
}
