//! Process-type table rendering
//!
//! Process types are listed sorted by type with commands aligned in one
//! column, so the output is stable across runs with the same set of types.

use unicode_width::UnicodeWidthStr;

use crate::domain::entities::Process;

/// Render one line per process: `"<type>:"` padded to the widest type plus
/// one column, a space, then the command
pub fn process_type_lines(processes: &[Process]) -> Vec<String> {
    let mut sorted: Vec<&Process> = processes.iter().collect();
    sorted.sort_by(|a, b| a.process_type.cmp(&b.process_type));

    let width = sorted
        .iter()
        .map(|p| p.process_type.width())
        .max()
        .unwrap_or(0)
        + 1;

    sorted
        .into_iter()
        .map(|p| {
            let label = format!("{}:", p.process_type);
            let padding = width.saturating_sub(label.width());
            format!("{}{} {}", label, " ".repeat(padding), p.command)
        })
        .collect()
}
