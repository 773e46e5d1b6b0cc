//! `edgo careers`: browse the built-in career table.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde::Serialize;

use edgo_core::career::builtin_database;
use edgo_types::career::CareerRecord;

#[derive(Debug, Serialize)]
struct CareerRow<'a> {
    category: &'a str,
    #[serde(flatten)]
    record: &'a CareerRecord,
}

pub fn list_careers(search: Option<&str>, json: bool) -> Result<()> {
    let database = builtin_database();
    let rows: Vec<CareerRow<'_>> = database
        .search(search.unwrap_or(""))
        .map(|(category, record)| CareerRow { category, record })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!(
            "  {} No careers match '{}'.",
            style("i").blue().bold(),
            search.unwrap_or_default()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", career_table(&rows));
    println!();
    println!(
        "  {} career{}  {}",
        style(rows.len()).bold(),
        if rows.len() == 1 { "" } else { "s" },
        style("(salaries in LPA, Lakhs Per Annum)").dim()
    );
    println!();

    Ok(())
}

fn career_table(rows: &[CareerRow<'_>]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Category").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Exams").fg(Color::White),
        Cell::new("Degrees").fg(Color::White),
        Cell::new("Colleges").fg(Color::White),
        Cell::new("Salary").fg(Color::White),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.category).fg(Color::DarkGrey),
            Cell::new(&row.record.role).fg(Color::Cyan),
            Cell::new(&row.record.exams),
            Cell::new(&row.record.degrees),
            Cell::new(&row.record.colleges),
            Cell::new(&row.record.salary).fg(Color::Green),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_json_is_flat() {
        let database = builtin_database();
        let (category, record) = database.search("clat").next().unwrap();
        let json = serde_json::to_value(CareerRow { category, record }).unwrap();
        assert_eq!(json["category"], "Arts");
        assert_eq!(json["role"], "Corporate Lawyer");
    }

    #[test]
    fn test_table_has_one_row_per_record() {
        let database = builtin_database();
        let rows: Vec<_> = database
            .search("")
            .map(|(category, record)| CareerRow { category, record })
            .collect();
        let table = career_table(&rows);
        assert_eq!(table.row_iter().count(), database.len());
    }
}
