//! Terminal rendering of reports and the rule catalogue.

use colored::Colorize;
use flightcheck::{Report, ReportSection, RuleDescriptor, ViolationGroup};

/// Print a report section by section.
pub fn print_report(report: &Report) {
    for section in &report.sections {
        print_section(section);
    }

    let summary = &report.summary;
    println!();
    if summary.total_violations == 0 {
        println!("{}", "All checks passed.".green().bold());
    } else {
        println!(
            "{} violations in {} of {} checks",
            summary.total_violations.to_string().red().bold(),
            summary.groups_with_violations.to_string().white().bold(),
            summary.total_groups
        );
    }
}

fn print_section(section: &ReportSection) {
    println!();
    println!("{}", section.title.cyan().bold());
    if let Some(source) = &section.source {
        println!("  Source: {} ({} rows)", source.file.white(), source.row_count);
    }

    let mut counts = format!("  Records: {}", section.total_records);
    if let Some(recent) = section.recent_records {
        counts.push_str(&format!(", recent: {}", recent));
    }
    if let Some(operated) = section.operated_count {
        counts.push_str(&format!(", operated: {}", operated));
    }
    println!("{}", counts);

    for group in &section.groups {
        print_group(group);
    }
}

fn print_group(group: &ViolationGroup) {
    println!();
    if group.is_empty() {
        println!("  {} {}", "✓".green(), group.label);
        return;
    }

    println!(
        "  {} {} ({})",
        "✗".red(),
        group.label.bold(),
        group.count.to_string().red()
    );

    let widths = column_widths(group);
    let header = format_line(group.columns.iter().map(String::as_str), &widths);
    println!("    {}", header.bold());

    for row in &group.rows {
        let line = format_line(row.values.values().map(String::as_str), &widths);
        if row.highlighted {
            println!("    {}", line.red());
        } else {
            println!("    {}", line);
        }
    }

    if let Some(warning) = &group.warning {
        println!("  {} {}", "⚠".yellow(), warning.yellow());
    }
}

/// Display width of each column: the widest of the header and its values.
fn column_widths(group: &ViolationGroup) -> Vec<usize> {
    group
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            group
                .rows
                .iter()
                .filter_map(|row| row.values.get_index(idx))
                .map(|(_, value)| value.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Print the rule catalogue.
pub fn print_rules(descriptors: &[RuleDescriptor]) {
    let width = descriptors.iter().map(|d| d.id.len()).max().unwrap_or(0);

    for descriptor in descriptors {
        let id = format!("{:<width$}", descriptor.id, width = width);
        println!("{}  {}", id.cyan(), descriptor.label.bold());
        println!("{:<width$}  {}", "", descriptor.description, width = width);
    }
}
