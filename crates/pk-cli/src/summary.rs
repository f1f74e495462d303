use clap::ColorChoice;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pk_cli::severity::{Severity, alert_severity, renal_severity, site_severity};
use pk_engine::RenalRuleTable;
use pk_map::Candidate;
use pk_model::{DecisionVerdict, DrugRecord, References};
use pk_standards::{DrugStore, ValidationReport};

const NO_DATA: &str = "no data";

pub fn print_drug_list(store: &DrugStore, color: ColorChoice) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Name"),
        header_cell("Class"),
    ]);
    apply_table_style(&mut table, color);
    for (key, record) in store.iter() {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(&record.name).add_attribute(Attribute::Bold),
            optional_cell(record.class.as_deref()),
        ]);
    }
    println!("{table}");
    println!("{} drugs", store.len());
}

pub fn print_suggestions(name: &str, candidates: &[Candidate], color: ColorChoice) {
    println!("No exact match for {name:?}. Did you mean:");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Drug"), header_cell("Similarity")]);
    apply_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    for candidate in candidates {
        table.add_row(vec![
            Cell::new(&candidate.key),
            Cell::new(format!("{:.2}", candidate.similarity)),
        ]);
    }
    println!("{table}");
}

pub fn print_record_card(key: &str, record: &DrugRecord, color: ColorChoice) {
    println!("{}", title_line(&record.name, record.class.as_deref()));
    let pk = &record.pharmacokinetics;

    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Value")]);
    apply_table_style(&mut table, color);
    let numbers = [
        ("Vd (L/kg)", pk.volume_of_distribution),
        ("Protein binding (%)", pk.protein_binding_percent),
        ("pKa", pk.pka),
    ];
    table.add_row(vec![label_cell("Key"), Cell::new(key)]);
    for (label, value) in numbers {
        let text = value.as_ref().map(ToString::to_string);
        table.add_row(vec![label_cell(label), optional_cell(text.as_deref())]);
    }
    let texts = [
        ("Acid/base", pk.acid_base.as_deref()),
        ("Renal adjustment", pk.renal_adjustment.as_deref()),
        ("Obesity", pk.obesity_adjustment.as_deref()),
        ("Hepatic impairment", pk.hepatic_adjustment.as_deref()),
        ("Clinical notes", pk.clinical_notes.as_deref()),
    ];
    for (label, value) in texts {
        table.add_row(vec![label_cell(label), optional_cell(value)]);
    }
    table.add_row(vec![
        label_cell("Alerts"),
        match pk.alerts.as_deref() {
            Some(text) => severity_cell(text, alert_severity(text)),
            None => dim_cell(NO_DATA),
        },
    ]);
    println!("{table}");

    if !pk.tissue_penetration.is_empty() {
        let mut tissue = Table::new();
        tissue.set_header(vec![header_cell("Site"), header_cell("Penetration")]);
        apply_table_style(&mut tissue, color);
        for (site, level) in pk.tissue_penetration.entries() {
            let label = format!("{} ({})", site.label(), site.key());
            let level_cell = match level {
                Some(text) => severity_cell(text, site_severity(text)),
                None => dim_cell(NO_DATA),
            };
            tissue.add_row(vec![label_cell(&label), level_cell]);
        }
        println!("{tissue}");
    }

    let citations = record
        .references
        .as_ref()
        .map(References::entries)
        .unwrap_or_default();
    if !citations.is_empty() {
        let mut refs = Table::new();
        refs.set_header(vec![header_cell("Field"), header_cell("Reference")]);
        apply_table_style(&mut refs, color);
        for (label, text) in citations {
            refs.add_row(vec![label_cell(label), dim_cell(text)]);
        }
        println!("{refs}");
    }
}

pub fn print_verdict(verdict: &DecisionVerdict, color: ColorChoice) {
    println!("{}", title_line(&verdict.drug, verdict.class.as_deref()));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Recommendation")]);
    apply_table_style(&mut table, color);
    table.add_row(vec![
        label_cell("Renal"),
        severity_cell(&verdict.renal, renal_severity(&verdict.renal)),
    ]);
    table.add_row(vec![label_cell("Obesity"), Cell::new(&verdict.obesity)]);
    table.add_row(vec![label_cell("Hepatic impairment"), Cell::new(&verdict.hepatic)]);
    table.add_row(vec![
        label_cell("Infection site"),
        severity_cell(&verdict.site, site_severity(&verdict.site)),
    ]);
    let notes = verdict.notes();
    table.add_row(vec![
        label_cell("Clinical notes"),
        if notes.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(bullet_list(notes))
        },
    ]);
    table.add_row(vec![
        label_cell("Alerts"),
        match verdict.alerts.as_deref() {
            Some(text) => severity_cell(text, alert_severity(text)),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
    println!("Decision support only; confirm against local protocols.");
}

pub fn print_validation(report: &ValidationReport) {
    println!("Database: {}", report.origin);
    for check in &report.records {
        println!("{check}");
    }
    println!(
        "{} valid, {} invalid",
        report.ok_count(),
        report.error_count()
    );
}

pub fn print_rules(rules: &RenalRuleTable, color: ColorChoice) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Drug"),
        header_cell("ClCr threshold"),
        header_cell("Below"),
        header_cell("At or above"),
    ]);
    apply_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    for rule in rules.iter() {
        table.add_row(vec![
            Cell::new(&rule.drug).add_attribute(Attribute::Bold),
            Cell::new(format!("{} mL/min", rule.threshold)),
            Cell::new(&rule.below).fg(Color::Yellow),
            Cell::new(&rule.at_or_above),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table, color: ColorChoice) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    match color {
        ColorChoice::Always => {
            table.enforce_styling();
        }
        ColorChoice::Never => {
            table.force_no_tty();
        }
        ColorChoice::Auto => {}
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn title_line(name: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("{name} ({class})"),
        None => name.to_string(),
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn severity_cell(text: &str, severity: Severity) -> Cell {
    let cell = Cell::new(text);
    match severity {
        Severity::Info => cell,
        Severity::Warning => cell.fg(Color::Yellow),
        Severity::Error => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell(NO_DATA),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
