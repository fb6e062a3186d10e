//! Text building blocks shared by the command handlers.
//!
//! Every helper returns a `String`; printing is left to the caller so the
//! same pieces can go to stdout or stderr.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};
use super::OutputMode;

/// Title line, e.g. `Formkit · fill (Order)`; `formkit fill` when plain.
pub fn header(ctx: &UiContext, command: &str, subject: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("formkit {}", command),
        OutputMode::Pretty => {
            let mut line = format!(
                "{} \u{00B7} {}",
                styled("Formkit", styles::bold(), ctx.color),
                command
            );
            if let Some(subject) = subject {
                line.push_str(&format!(" ({})", subject));
            }
            line
        }
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let mark = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    match message {
        "" => mark,
        _ => format!("{} {}", mark, message),
    }
}

/// `Key: value` when pretty, `key=value` with a snake_case key otherwise.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if !ctx.mode.is_pretty() {
        return format!("{}={}", key.to_lowercase().replace(' ', "_"), value);
    }
    format!("{} {}", styled(&format!("{}:", key), styles::dim(), ctx.color), value)
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if !ctx.mode.is_pretty() {
        return format!("hint={}", text);
    }
    format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
}

/// Outcome block after a write: a badge and indented pairs, or
/// `status=ok` followed by `key=value` lines.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let pretty = ctx.mode.is_pretty();
    let first = if pretty {
        badge(ctx, Badge::Ok, title)
    } else {
        "status=ok".to_string()
    };
    let indent = if pretty { "  " } else { "" };

    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Bordered table when pretty; headerless tab-separated rows otherwise.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(ctx.width).unwrap_or(u16::MAX))
        .set_header(columns.iter().map(|c| c.header));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Write to stdout; JSON mode keeps stdout for the document alone.
pub fn print(ctx: &UiContext, message: &str) {
    if ctx.mode.is_json() {
        return;
    }
    println!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: mode == OutputMode::Pretty,
            width: 80,
            mode,
        }
    }

    #[test]
    fn test_header_per_mode() {
        assert_eq!(
            header(&ctx(OutputMode::Pretty), "fill", Some("Order")),
            "Formkit \u{00B7} fill (Order)"
        );
        assert_eq!(header(&ctx(OutputMode::Plain), "list", None), "formkit list");
        assert!(header(&ctx(OutputMode::Json), "list", None).is_empty());
    }

    #[test]
    fn test_badge_without_message() {
        assert_eq!(badge(&ctx(OutputMode::Plain), Badge::Warn, ""), "[WARN]");
        assert_eq!(badge(&ctx(OutputMode::Plain), Badge::Ok, "Saved"), "[OK] Saved");
    }

    #[test]
    fn test_kv_keys() {
        assert_eq!(kv(&ctx(OutputMode::Pretty), "Saved forms", "2"), "Saved forms: 2");
        assert_eq!(kv(&ctx(OutputMode::Plain), "Saved forms", "2"), "saved_forms=2");
    }

    #[test]
    fn test_receipt_lines() {
        let items = [("ID", "abc"), ("Name", "Signup")];
        assert_eq!(
            receipt(&ctx(OutputMode::Plain), "Saved form", &items),
            "status=ok\nid=abc\nname=Signup"
        );
        let pretty = receipt(&ctx(OutputMode::Pretty), "Saved form", &items);
        assert_eq!(pretty.lines().count(), 3);
        assert!(pretty.lines().nth(1).unwrap().starts_with("  ID:"));
    }

    #[test]
    fn test_table_modes() {
        let columns = [Column::new("Field"), Column::new("Value")];
        let rows = vec![vec!["Total".to_string(), "30".to_string()]];

        assert_eq!(table(&ctx(OutputMode::Plain), &columns, &rows), "Total\t30");
        let pretty = table(&ctx(OutputMode::Pretty), &columns, &rows);
        assert!(pretty.contains("Field"));
        assert!(pretty.contains("Total"));
    }
}
