#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
}

impl TableOptions {
    /// Fit to `$COLUMNS` when the shell exports it.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|raw| raw.trim().parse().ok())
                .filter(|width: &usize| *width > 0),
        }
    }
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .max()
                .unwrap_or(0)
                .max(display_len(header))
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_len(header_line.trim_end()));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                format_cell(&truncated, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

/// Shrink the widest columns until the table fits `max_width`.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_len(headers[*idx]).max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn display_len(value: &str) -> usize {
    value.chars().count()
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_len(value) <= width {
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
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(display_len(value));
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NO_LIMIT: TableOptions = TableOptions { max_width: None };

    #[test]
    fn aligns_columns_and_right_aligns_numbers() {
        let rows = vec![
            vec!["1".to_string(), "todo".to_string(), "short".to_string()],
            vec!["120".to_string(), "in_progress".to_string(), "a longer title".to_string()],
        ];
        let table = render_entity_table(&["id", "status", "title"], &rows, NO_LIMIT);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id   status       title");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "  1  todo         short");
        assert_eq!(lines[3], "120  in_progress  a longer title");
    }

    #[test]
    fn shrinks_widest_column_to_fit() {
        let rows = vec![vec!["1".to_string(), "x".repeat(40)]];
        let table = render_entity_table(&["id", "title"], &rows, TableOptions { max_width: Some(20) });
        let row = table.lines().nth(2).unwrap();
        assert!(display_len(row) <= 20);
        assert!(row.ends_with('…'));
    }
}
