//! Presentación en consola de los registros analizados.

use super::export::fixed_fields;
use super::report::Metadata;
use crate::analyzers::labels::{ERROR, NO_RESOLUTION, NOT_APPLICABLE};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Row, Table};
use console::style;

/// Texto listo para imprimir: un encabezado y una tabla por archivo, más un
/// resumen final.
pub fn render_report(records: &[Metadata]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!(
            "\n{}\n",
            style(format!("━━━ {} ━━━", record.filename)).cyan().bold()
        ));
        output.push_str(&build_metadata_table(record).to_string());
        output.push('\n');
    }

    let failures = records.iter().filter(|record| record.is_failure()).count();
    let summary = format!(
        "{} file(s) analyzed, {} with errors",
        records.len(),
        failures
    );
    let summary = if failures > 0 {
        style(summary).yellow()
    } else {
        style(summary).dim()
    };
    output.push_str(&format!("\n{summary}\n"));
    output
}

pub fn build_metadata_table(record: &Metadata) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);

    for (label, value) in fixed_fields(record) {
        if let Some(value) = value {
            let color = value_color(&value);
            table.add_row(build_row(label, &value, color));
        }
    }

    for (key, value) in record.additional_info.iter().flatten() {
        let color = if key == ERROR {
            Color::Red
        } else {
            value_color(value)
        };
        table.add_row(build_row(key, value, color));
    }

    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
        .add_attribute(Attribute::Underlined)
}

fn build_row(label: &str, value: &str, value_color: Color) -> Row {
    Row::from(vec![
        Cell::new(label).fg(Color::Rgb {
            r: 160,
            g: 196,
            b: 255,
        }),
        Cell::new(value).fg(value_color),
    ])
}

fn value_color(value: &str) -> Color {
    match value {
        NOT_APPLICABLE | NO_RESOLUTION => Color::DarkGrey,
        "Yes" | "Valid" => Color::Green,
        "Invalid" => Color::Red,
        _ => Color::White,
    }
}
