use std::collections::BTreeSet;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use salary_model::{LevelKey, PredictionBreakdown, RoleKey, SalaryRange, SkillKey};
use salary_standards::SalaryTables;

pub fn print_breakdown(breakdown: &PredictionBreakdown) {
    println!("Role: {}", breakdown.role);
    println!("Level: {}", breakdown.level);
    println!("Skills: {}", skills_label(&breakdown.skills));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Low"),
        header_cell("Mid"),
        header_cell("High"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let candidates = &breakdown.candidates;
    let stages = [
        ("Baseline", breakdown.baseline()),
        (
            "Growth",
            SalaryRange::new(breakdown.growth_low, breakdown.growth_high),
        ),
        (
            "Inflation",
            SalaryRange::new(breakdown.inflation_low, breakdown.inflation_high),
        ),
        ("A  base", candidates.a),
        ("B  + skills", candidates.b),
        ("C  + geo", candidates.c),
        ("D  + skills + geo", candidates.d),
        ("E  + regression", candidates.e),
    ];
    for (label, range) in stages {
        table.add_row(vec![
            Cell::new(label),
            money_cell(range.low),
            dim_cell(format_money(range.mid())),
            money_cell(range.high),
        ]);
    }
    table.add_row(vec![
        Cell::new("Final")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        money_cell(breakdown.final_low).add_attribute(Attribute::Bold),
        Cell::new(format_money(breakdown.final_mid))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        money_cell(breakdown.final_high).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let mut factors = Table::new();
    factors.set_header(vec![header_cell("Factor"), header_cell("Multiplier")]);
    apply_table_style(&mut factors);
    align_column(&mut factors, 1, CellAlignment::Right);
    for (label, value) in [
        ("Skills", breakdown.skills_multiplier),
        ("Location", breakdown.geo_multiplier),
        ("Experience", breakdown.regression_multiplier),
    ] {
        factors.add_row(vec![Cell::new(label), multiplier_cell(value)]);
    }
    factors.add_row(vec![
        Cell::new("Uplift vs baseline").add_attribute(Attribute::Bold),
        Cell::new(format!("{:+.1}%", breakdown.uplift() * 100.0)).add_attribute(Attribute::Bold),
    ]);
    println!("{factors}");
}

pub fn print_batch_summary(breakdowns: &[PredictionBreakdown]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Role"),
        header_cell("Level"),
        header_cell("Skills"),
        header_cell("Low"),
        header_cell("Mid"),
        header_cell("High"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for index in 4..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (index, breakdown) in breakdowns.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(breakdown.role.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(breakdown.level.as_str()),
            Cell::new(skills_label(&breakdown.skills)),
            money_cell(breakdown.final_low),
            Cell::new(format_money(breakdown.final_mid))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            money_cell(breakdown.final_high),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} predictions", breakdowns.len())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_tables(tables: &SalaryTables) {
    println!("Guide: {}", tables.guide());
    let projection = tables.projection();
    println!(
        "Projection: {} -> {} ({} years), inflation x{:.4}",
        projection.base_year,
        projection.target_year,
        projection.years(),
        tables.inflation_multiplier()
    );

    let levels: BTreeSet<&LevelKey> = tables
        .role_keys()
        .flat_map(|role| tables.levels_for(role).map(|(level, _)| level))
        .collect();

    let mut header = vec![header_cell("Role"), header_cell("Growth")];
    header.extend(levels.iter().map(|level| header_cell(level.as_str())));
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=levels.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for role in tables.role_keys() {
        let mut row = vec![
            Cell::new(role.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            growth_cell(tables, role),
        ];
        for level in &levels {
            row.push(match tables.baseline(role, level) {
                Some(range) => Cell::new(format!(
                    "{} - {}",
                    format_money(range.low),
                    format_money(range.high)
                )),
                None => dim_cell("-"),
            });
        }
        table.add_row(row);
    }
    println!("{table}");

    let policy = tables.skills_policy();
    println!(
        "Skills: {} premiums, cap {:.0}%, damping {:.2} (max x{:.4})",
        tables.skill_premiums().len(),
        policy.cap * 100.0,
        policy.damping,
        policy.max_multiplier()
    );
    println!(
        "Locations: {} codes, default x{:.2}",
        tables.locations().len(),
        tables.default_location_multiplier()
    );
}

/// Role-specific growth rates in normal text, the default rate dimmed.
fn growth_cell(tables: &SalaryTables, role: &RoleKey) -> Cell {
    match tables.growth_overrides().get(role) {
        Some(rate) => Cell::new(format!("{:.1}%", rate * 100.0)),
        None => dim_cell(format!("{:.1}%", tables.default_growth_rate() * 100.0)),
    }
}

pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn skills_label(skills: &BTreeSet<SkillKey>) -> String {
    if skills.is_empty() {
        "-".to_string()
    } else {
        skills
            .iter()
            .map(SkillKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn money_cell(value: f64) -> Cell {
    Cell::new(format_money(value))
}

fn multiplier_cell(value: f64) -> Cell {
    let cell = Cell::new(format!("x{value:.4}"));
    if value > 1.0 {
        cell.fg(Color::Green)
    } else if value < 1.0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::DarkGrey)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(999.4), "$999");
        assert_eq!(format_money(1_000.0), "$1,000");
        assert_eq!(format_money(177_441.4993), "$177,441");
        assert_eq!(format_money(1_234_567.5), "$1,234,568");
        assert_eq!(format_money(-2_500.0), "-$2,500");
    }
}
