#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_COLUMN)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let padded = pad(&text, *width, looks_numeric(&text));
                if options.color {
                    colorize(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join("  "));
    }
    lines.join("\n")
}

/// Narrow the widest columns one character at a time until the table fits,
/// never below a column's header width.
fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap a padded cell in a color code chosen from its plain text.
fn colorize(padded: &str, text: &str) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "done" | "true" | "low" => "32",
        "in-progress" | "medium" | "stale" | "degraded" | "generation_failed" | "unparseable"
        | "unavailable" => "33",
        "high" | "false" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec![
            "t1".to_string(),
            "a title far too long for the terminal".to_string(),
        ]];
        let table = render_entity_table(
            &["id", "title"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let body = table.lines().nth(2).unwrap();
        assert_eq!(body.chars().count(), 20);
        assert!(body.ends_with('…'));
    }

    #[test]
    fn color_wraps_known_statuses_only() {
        let rows = vec![vec!["done".to_string()], vec!["todo".to_string()]];
        let table = render_entity_table(
            &["status"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].starts_with("\u{1b}[32m"));
        assert!(!lines[3].contains('\u{1b}'));
    }

    #[test]
    fn numbers_align_right() {
        assert_eq!(pad("42", 6, true), "    42");
        assert_eq!(pad("t1", 6, false), "t1    ");
    }
}
