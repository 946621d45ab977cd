//! Plain-text column rendering.

/// Render `rows` under `headers` with columns padded to their widest cell.
/// Rows shorter than the header are padded with blanks.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &widths, headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &widths, &rule);
    for row in rows {
        push_line(&mut out, &widths, row);
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, widths: &[usize], cells: &[S]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map_or("", |c| c.as_ref());
            format!("{cell:<w$}")
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let out = render(
            &["code", "name"],
            &[
                vec!["US".into(), "United States".into()],
                vec!["FR".into(), "France".into()],
            ],
        );
        let expected = "\
code  name
----  -------------
US    United States
FR    France
";
        assert_eq!(out, expected);
    }

    #[test]
    fn short_rows_are_padded() {
        let out = render(&["a", "b"], &[vec!["x".into()]]);
        assert_eq!(out.lines().last(), Some("x"));
    }

    #[test]
    fn empty_table_has_header_only() {
        let out = render(&["code"], &[]);
        assert_eq!(out, "code\n----\n");
    }
}
