//! Usage and help rendering.
//!
//! Help text is laid out in two columns, the flags on the left and the
//! wrapped description on the right. Column widths are measured in display
//! columns: any character above U+00FF (CJK ideographs, full-width
//! punctuation) takes two.

use std::path::Path;

use crate::types::{Meta, OptionSpec, SchemeDefinition};

/// Header printed above the option rows.
pub const OPTIONS_HEADER: &str = "Optional Arguments:";

/// Closing punctuation that must not start a wrapped line.
const PUNCTUATION: [char; 18] = [
    '。', '”', '：', '，', ',', '」', '』', '!', '！', '?', '？', '}', ']', '】', ';', '；', ')',
    '）',
];

/// Per-invocation values the renderer prints.
///
/// Built once from the program path and the scheme metadata, then passed to
/// every render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpContext {
    /// Program name shown in the usage line
    pub program: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl HelpContext {
    /// Creates a context; `program` may be a full path, only its file name
    /// is kept.
    pub fn new(program: &str, meta: &Meta) -> Self {
        let program = Path::new(program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.to_string());
        Self {
            program,
            version: meta.version.clone(),
            description: meta.description.clone(),
        }
    }
}

/// Column layout of the help body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Spaces before each row
    pub indent: usize,
    /// Width of the flag column, including the gap before the help text
    pub flag_width: usize,
    /// Width the help text is wrapped to
    pub help_width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            indent: 2,
            flag_width: 30,
            help_width: 50,
        }
    }
}

/// Display width of a string: two columns for characters above U+00FF.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    if u32::from(ch) > 0xFF { 2 } else { 1 }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '/' | '.' | '\'' | '"' | '-' | ':' | '_')
}

fn pad_end(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Wraps text to `max_width` display columns.
///
/// Runs of ASCII word characters are kept on one line unless a single run
/// is wider than the column. Closing punctuation that would start a line is
/// moved to the end of the previous one.
///
/// # Examples
///
/// ```
/// use filekit_core::wrap_text;
///
/// assert_eq!(wrap_text("copy the pages", 9), vec!["copy the", "pages"]);
/// assert_eq!(wrap_text("输出路径。", 8), vec!["输出路径。"]);
/// ```
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let lines = text
        .lines()
        .flat_map(|line| slice_line(line, max_width.max(1)))
        .map(|line| line.trim().to_string());

    let mut out: Vec<String> = Vec::new();
    for mut line in lines {
        if let (Some(prev), Some(first)) = (out.last_mut(), line.chars().next()) {
            if PUNCTUATION.contains(&first) {
                if !prev.ends_with(first) {
                    prev.push(first);
                }
                line.drain(..first.len_utf8());
                if line.trim().is_empty() {
                    continue;
                }
                line = line.trim_start().to_string();
            }
        }
        out.push(line);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn slice_line(line: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for ch in line.chars() {
        let w = char_width(ch);
        if width + w > max_width && !current.is_empty() {
            let split = if is_word_char(ch) {
                current
                    .char_indices()
                    .rev()
                    .take_while(|(_, c)| is_word_char(*c))
                    .last()
                    .map_or(current.len(), |(index, _)| index)
            } else {
                current.len()
            };

            if split == 0 {
                // A single run wider than the column: hard break.
                lines.push(std::mem::take(&mut current));
            } else {
                let tail = current.split_off(split);
                lines.push(std::mem::replace(&mut current, tail));
            }
            width = display_width(&current);
        }
        current.push(ch);
        width += w;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn flag_cell(option: &OptionSpec) -> String {
    let symbol = option.symbol.as_deref().map(str::to_uppercase);
    let mut cell = format!("-{}", option.key);
    if let Some(symbol) = &symbol {
        cell.push(' ');
        cell.push_str(symbol);
    }
    if let Some(alias) = &option.alias {
        cell.push_str(", --");
        cell.push_str(alias);
        if let Some(symbol) = &symbol {
            cell.push('=');
            cell.push_str(symbol);
        }
    }
    cell
}

/// Renders the usage line: `Usage: prog [-v] [-h] [-f FOLDER] [-D]`.
pub fn render_usage(scheme: &SchemeDefinition, ctx: &HelpContext) -> String {
    let mut parts = vec![format!("Usage: {} [-v] [-h]", ctx.program)];
    parts.extend(scheme.options.iter().map(|option| {
        match option.symbol.as_deref() {
            Some(symbol) => format!("[-{} {}]", option.key, symbol.to_uppercase()),
            None => format!("[-{}]", option.key),
        }
    }));
    parts.join(" ")
}

/// Renders the two-column rows for a list of `(flags, help)` pairs.
///
/// A flag cell too wide for its column gets a line of its own and the help
/// text starts on the next line.
pub fn render_rows(rows: &[(String, String)], layout: &HelpLayout) -> Vec<String> {
    let indent = " ".repeat(layout.indent);
    let mut out = Vec::new();

    for (flags, help) in rows {
        let wrapped = if help.trim().is_empty() {
            Vec::new()
        } else {
            wrap_text(help, layout.help_width)
        };
        let mut help_lines = wrapped.into_iter();
        if display_width(flags) >= layout.flag_width {
            out.push(format!("{indent}{flags}"));
        } else {
            let first = help_lines.next().unwrap_or_default();
            out.push(
                format!("{indent}{}{first}", pad_end(flags, layout.flag_width))
                    .trim_end()
                    .to_string(),
            );
        }
        for line in help_lines {
            out.push(
                format!("{indent}{}{line}", " ".repeat(layout.flag_width))
                    .trim_end()
                    .to_string(),
            );
        }
    }

    out
}

/// Renders the full help text.
///
/// # Examples
///
/// ```
/// use filekit_core::*;
///
/// let scheme = SchemeDefinition::new()
///     .with_version("0.0.1")
///     .with_description("List a folder")
///     .with_option(
///         OptionSpec::new("f", ValueType::STRING)
///             .with_alias("folder")
///             .with_symbol("folder")
///             .with_help("Target folder"),
///     );
/// let ctx = HelpContext::new("/usr/bin/file-list", &scheme.meta);
/// let help = render_help(&scheme, &ctx, &HelpLayout::default());
///
/// assert!(help.starts_with("Usage: file-list [-v] [-h] [-f FOLDER]\n"));
/// assert!(help.contains("-f FOLDER, --folder=FOLDER"));
/// ```
pub fn render_help(scheme: &SchemeDefinition, ctx: &HelpContext, layout: &HelpLayout) -> String {
    let mut lines = vec![render_usage(scheme, ctx)];

    for text in [&ctx.version, &ctx.description].into_iter().flatten() {
        if !text.is_empty() {
            lines.push(String::new());
            lines.push(text.clone());
        }
    }

    lines.push(String::new());
    lines.push(OPTIONS_HEADER.to_string());

    let rows: Vec<(String, String)> = scheme
        .options
        .iter()
        .map(|option| (flag_cell(option), option.help.clone()))
        .collect();
    lines.extend(render_rows(&rows, layout));

    let mut help = lines.join("\n");
    help.push('\n');
    help
}

#[cfg(test)]
mod tests {
    use crate::types::ValueType;

    use super::*;

    #[test]
    fn test_display_width_counts_wide_chars_twice() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("目标"), 4);
        assert_eq!(display_width("é"), 1);
        assert_eq!(display_width("a　b"), 4);
    }

    #[test]
    fn test_wide_text_wraps_at_half_the_characters() {
        let narrow = wrap_text(&"a ".repeat(20), 10);
        let wide = wrap_text(&"文".repeat(20), 10);

        assert_eq!(wide.len(), 4);
        assert!(wide.iter().all(|line| line.chars().count() == 5));
        assert!(narrow.iter().all(|line| display_width(line) <= 10));
        assert_eq!(narrow[0], "a a a a a");
    }

    #[test]
    fn test_words_are_not_split() {
        assert_eq!(
            wrap_text("merge several files into one", 12),
            vec!["merge", "several", "files into", "one"]
        );
    }

    #[test]
    fn test_word_after_wide_text_moves_whole() {
        // No wide character is repeated or lost when the word moves.
        assert_eq!(wrap_text("目标abc", 6), vec!["目标", "abc"]);
    }

    #[test]
    fn test_overlong_word_is_hard_broken() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_leading_punctuation_moves_to_previous_line() {
        assert_eq!(wrap_text("一二三四。五", 8), vec!["一二三四。", "五"]);
        assert_eq!(wrap_text("一二三四）），五", 8), vec!["一二三四）", "），五"]);
    }

    #[test]
    fn test_punctuation_not_doubled() {
        let lines = wrap_text("一二三。\n。后续", 20);
        assert_eq!(lines, vec!["一二三。", "后续"]);
    }

    #[test]
    fn test_explicit_newlines_are_kept() {
        assert_eq!(wrap_text("first\nsecond", 40), vec!["first", "second"]);
        assert_eq!(wrap_text("", 40), vec![""]);
    }

    #[test]
    fn test_flag_cell_variants() {
        let full = OptionSpec::new("f", ValueType::STRING)
            .with_alias("folder")
            .with_symbol("folder");
        let bare = OptionSpec::new("D", ValueType::BOOLEAN).with_alias("dry-run");
        let short = OptionSpec::new("x", ValueType::BOOLEAN);

        assert_eq!(flag_cell(&full), "-f FOLDER, --folder=FOLDER");
        assert_eq!(flag_cell(&bare), "-D, --dry-run");
        assert_eq!(flag_cell(&short), "-x");
    }

    #[test]
    fn test_usage_lists_options_in_declaration_order() {
        let scheme = SchemeDefinition::new()
            .with_option(OptionSpec::new("f", ValueType::STRING).with_symbol("folder"))
            .with_option(OptionSpec::new("D", ValueType::BOOLEAN))
            .with_option(OptionSpec::new("c", ValueType::INTEGER).with_symbol("count"));
        let ctx = HelpContext::new("prune-files", &scheme.meta);

        assert_eq!(
            render_usage(&scheme, &ctx),
            "Usage: prune-files [-v] [-h] [-f FOLDER] [-D] [-c COUNT]"
        );
    }

    #[test]
    fn test_rows_wrap_help_in_second_column() {
        let layout = HelpLayout {
            indent: 2,
            flag_width: 8,
            help_width: 10,
        };
        let rows = vec![("-c".to_string(), "files to keep in folder".to_string())];

        assert_eq!(
            render_rows(&rows, &layout),
            vec!["  -c      files to", "          keep in", "          folder"]
        );
    }

    #[test]
    fn test_wide_flag_cell_pushes_help_down() {
        let layout = HelpLayout {
            indent: 0,
            flag_width: 6,
            help_width: 20,
        };
        let rows = vec![("-f, --folder".to_string(), "target".to_string())];

        assert_eq!(
            render_rows(&rows, &layout),
            vec!["-f, --folder", "      target"]
        );
    }

    #[test]
    fn test_render_help_sections() {
        let scheme = SchemeDefinition::new()
            .with_version("0.0.1")
            .with_description("Prune a folder")
            .with_option(
                OptionSpec::new("c", ValueType::INTEGER)
                    .with_alias("count")
                    .with_symbol("count")
                    .with_help("Files to keep"),
            );
        let ctx = HelpContext::new("/opt/bin/prune-files", &scheme.meta);
        let help = render_help(&scheme, &ctx, &HelpLayout::default());
        let lines: Vec<&str> = help.lines().collect();

        assert_eq!(lines[0], "Usage: prune-files [-v] [-h] [-c COUNT]");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "0.0.1");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Prune a folder");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], OPTIONS_HEADER);
        assert_eq!(
            lines[7],
            format!("  {:<30}Files to keep", "-c COUNT, --count=COUNT")
        );
    }
}
