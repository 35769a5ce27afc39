use std::io::{self, Write};

use crossterm::style::Color;

use super::text::{strip_escapes, visual_width, Line, Style};
use super::Backend;

/// Colors of one boxed section.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Palette {
    pub border: Color,
    pub title: Color,
}

pub(crate) const HELP_PALETTE: Palette = Palette {
    border: Color::Green,
    title: Color::Yellow,
};

pub(crate) const ERRORS_PALETTE: Palette = Palette {
    border: Color::Red,
    title: Color::Yellow,
};

/// Surrounds `lines` with a rounded border and puts `title` in the top edge.
///
/// Every returned row has the same visual width: the widest line plus the
/// border and one space of margin on each side.
pub(crate) fn boxed(title: &str, lines: &[Line], palette: Palette) -> Vec<Line> {
    let border = Style::color(palette.border);
    let title_width = visual_width(title);
    let widest = lines.iter().map(Line::width).max().unwrap_or(0);
    let inner = if title_width > 0 {
        widest.max(title_width + 1)
    } else {
        widest
    };

    let top = if title_width > 0 {
        Line::new()
            .styled("╭─ ", border)
            .styled(title, Style::color(palette.title).bold())
            .styled(format!(" {}╮", "─".repeat(inner - title_width - 1)), border)
    } else {
        Line::new().styled(format!("╭{}╮", "─".repeat(inner + 2)), border)
    };

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(top);
    for line in lines {
        rows.push(
            Line::new()
                .styled("│ ", border)
                .append(line.clone().pad_to(inner))
                .styled(" │", border),
        );
    }
    rows.push(Line::new().styled(format!("╰{}╯", "─".repeat(inner + 2)), border));

    rows
}

/// Writes one section: boxed when decorated, otherwise the title on its own
/// line followed by the bare lines.
pub(crate) fn write_section<W: Write>(
    out: &mut W,
    title: &str,
    lines: &[Line],
    palette: Palette,
    backend: Backend,
) -> io::Result<()> {
    match backend {
        Backend::Decorated => {
            for row in boxed(title, lines, palette) {
                row.write_to(out, backend)?;
                writeln!(out)?;
            }
        }
        Backend::Plain => {
            let title = strip_escapes(title);
            if !title.is_empty() {
                writeln!(out, "{title}")?;
            }
            for line in lines {
                line.write_to(out, backend)?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> Vec<Line> {
        vec![
            Line::new().text("  ").styled("short", Style::color(Color::Cyan).bold()),
            Line::new().text("  \x1b[4ma much longer line\x1b[0m"),
            Line::new(),
        ]
    }

    #[test]
    fn test_boxed_rows_share_one_width() {
        let rows = boxed("Demo", &sample_lines(), HELP_PALETTE);
        let widths: Vec<usize> = rows.iter().map(Line::width).collect();

        assert_eq!(rows.len(), 5);
        assert!(widths.iter().all(|width| *width == widths[0]));
        assert_eq!(widths[0], "  a much longer line".len() + 4);
    }

    #[test]
    fn test_boxed_title_in_top_edge() {
        let rows = boxed("Demo", &[Line::new().text("x")], HELP_PALETTE);
        assert_eq!(rows[0].plain_text(), "╭─ Demo ╮");
        assert_eq!(rows[1].plain_text(), "│ x     │");
        assert_eq!(rows[2].plain_text(), "╰───────╯");
    }

    #[test]
    fn test_boxed_without_title() {
        let rows = boxed("", &[Line::new().text("abc")], ERRORS_PALETTE);
        assert_eq!(rows[0].plain_text(), "╭─────╮");
        assert_eq!(rows[1].plain_text(), "│ abc │");
    }

    #[test]
    fn test_decorated_output_aligns_despite_escapes() {
        let mut out = Vec::new();
        write_section(&mut out, "Demo", &sample_lines(), HELP_PALETTE, Backend::Decorated).unwrap();
        let written = String::from_utf8(out).unwrap();

        let widths: Vec<usize> = written.lines().map(visual_width).collect();
        assert_eq!(widths.len(), 5);
        assert!(widths.iter().all(|width| *width == widths[0]));
    }

    #[test]
    fn test_plain_output_has_no_borders_or_escapes() {
        let mut out = Vec::new();
        write_section(&mut out, "Demo", &sample_lines(), HELP_PALETTE, Backend::Plain).unwrap();
        let written = String::from_utf8(out).unwrap();

        assert_eq!(written, "Demo\n  short\n  a much longer line\n\n");
    }
}
