//! Property tests for the process-type table.

use proptest::prelude::*;

use buildlayers::domain::services::process_type_lines;
use buildlayers::Process;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: commands start in the same column on every line, one past
    /// the longest type label, and lines are sorted by type.
    #[test]
    fn property_commands_are_aligned(
        table in proptest::collection::btree_map("[a-z][a-z-]{0,20}", "[a-z./ -]{1,20}", 1..8)
    ) {
        let processes: Vec<Process> = table
            .iter()
            .rev()
            .map(|(t, c)| Process::new(t.clone(), c.clone()))
            .collect();
        let lines = process_type_lines(&processes);
        let width = table.keys().map(|t| t.len()).max().unwrap() + 1;

        prop_assert_eq!(lines.len(), table.len());
        for (line, (process_type, command)) in lines.iter().zip(&table) {
            let label = format!("{}:", process_type);
            prop_assert!(line.starts_with(&label));
            prop_assert_eq!(&line[width + 1..], command.as_str());
            prop_assert!(line[label.len()..=width].chars().all(|c| c == ' '));
        }
    }
}

