//! Table and text layout helpers used by the CLI.
//! Cells arrive already truncated and possibly colored; widths are measured
//! on visible characters so ANSI codes never skew alignment.

const GAP: &str = "  ";

/// Render a table with columns capped at `caps`. A column is as wide as its
/// widest visible cell (header included) but never wider than its cap.
pub fn render_table(
    headers: &[String],
    rows: &[Vec<String>],
    caps: &[usize],
) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }
    for (w, cap) in widths.iter_mut().zip(caps) {
        *w = (*w).min(*cap);
    }

    let header_line = format_row(headers, &widths);
    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&"-".repeat(display_len(&header_line)));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let last = row.len().min(widths.len()).saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        if i == last {
            line.push_str(cell);
        } else {
            line.push_str(&pad_field(cell, *width));
        }
    }
    line
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
pub fn pad_field(display: &str, target: usize) -> String {
    let padding = target.saturating_sub(display_len(display));
    format!("{display}{}", " ".repeat(padding))
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}
