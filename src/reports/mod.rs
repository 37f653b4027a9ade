use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::time::Duration;

pub fn print_candidates(code: &str, context: &[String], candidates: &[String]) {
    println!(
        "\nCode: [{}]   Context: {}",
        code,
        if context.is_empty() {
            "(none)".to_string()
        } else {
            context.join(" ")
        }
    );

    if candidates.is_empty() {
        println!("No suggestions.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Word").add_attribute(Attribute::Bold),
    ]);
    if let Some(col) = table.column_mut(0) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (i, word) in candidates.iter().enumerate() {
        let cell = Cell::new(word);
        let cell = if i == 0 { cell.fg(Color::Green) } else { cell };
        table.add_row(vec![Cell::new(format!(":{}", i + 1)), cell]);
    }
    println!("{}", table);
}

pub struct ReplaySummary {
    pub queries: usize,
    pub empty: usize,
    pub total_candidates: usize,
    pub longest: usize,
    pub elapsed: Duration,
}

pub fn print_replay_summary(s: &ReplaySummary) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mean = if s.queries > 0 {
        s.total_candidates as f64 / s.queries as f64
    } else {
        0.0
    };
    let per_query_us = if s.queries > 0 {
        s.elapsed.as_secs_f64() * 1_000_000.0 / s.queries as f64
    } else {
        0.0
    };

    table.add_row(vec![
        Cell::new("Queries").add_attribute(Attribute::Bold),
        Cell::new("Empty").fg(Color::Red),
        Cell::new("Mean Len"),
        Cell::new("Max Len"),
        Cell::new("µs/query").fg(Color::Cyan),
    ]);
    for i in 0..5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.add_row(vec![
        Cell::new(s.queries),
        Cell::new(s.empty).fg(Color::Red),
        Cell::new(format!("{:.2}", mean)),
        Cell::new(s.longest),
        Cell::new(format!("{:.1}", per_query_us)).fg(Color::Cyan),
    ]);
    println!("\n{}", table);
}
