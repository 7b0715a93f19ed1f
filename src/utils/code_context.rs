//! Code context extraction utilities
//!
//! Picks the lines shown around a finding and trims parenthesis noise from
//! the literal's column span.

/// Lines surrounding a finding and the position of the finding's own line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub lines: Vec<String>,
    pub index: usize,
}

/// Extract up to three lines around `line_idx`
///
/// # Arguments
/// * `lines` - The full file, one entry per line
/// * `line_idx` - 0-indexed line of the finding
///
/// # Returns
/// The line above, the line itself and the line below. At the top of the file
/// the two following lines are used instead, at the bottom the two preceding
/// ones. The outer lines are dropped when blank; the finding's own line is
/// always kept.
///
/// # Example
/// ```
/// use numlint::utils::extract_context;
///
/// let lines: Vec<String> = ["a()", "b(1)", "c()"].iter().map(|s| s.to_string()).collect();
/// let window = extract_context(&lines, 1);
/// assert_eq!(window.lines, vec!["a()", "b(1)", "c()"]);
/// assert_eq!(window.index, 1);
/// ```
pub fn extract_context(lines: &[String], line_idx: usize) -> ContextWindow {
    let last_idx = lines.len().saturating_sub(1);

    // Index of the window's first line relative to line_idx
    let first = if line_idx == 0 {
        0
    } else if line_idx == last_idx {
        line_idx as isize - 2
    } else {
        line_idx as isize - 1
    };

    let mut context = Vec::with_capacity(3);
    let mut index = 0;

    for (position, candidate) in (first..first + 3).enumerate() {
        let Some(line) = usize::try_from(candidate).ok().and_then(|idx| lines.get(idx)) else {
            continue;
        };

        let is_target = candidate == line_idx as isize;
        let is_boundary = position != 1;

        if is_boundary && !is_target && line.trim().is_empty() {
            continue;
        }

        if is_target {
            index = context.len();
        }
        context.push(line.clone());
    }

    ContextWindow {
        lines: context,
        index,
    }
}

/// Shrink a column span that swallowed an enclosing parenthesis
///
/// Some parsers report `(1000)` as the literal's span. Columns are 0-indexed
/// byte offsets into `line`; the end column is exclusive.
pub fn correct_columns(line: &str, start_column: usize, end_column: usize) -> (usize, usize) {
    let bytes = line.as_bytes();
    let mut start = start_column;
    let mut end = end_column;

    if bytes.get(start) == Some(&b'(') {
        start += 1;
    }

    if end > start && end.checked_sub(1).and_then(|idx| bytes.get(idx)) == Some(&b')') {
        end -= 1;
    }

    (start, end)
}
