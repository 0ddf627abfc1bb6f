use crate::models::{DatasetKind, Entry, KeyGroups};
use tracing::debug;

/// Parses raw CSV text into entries grouped by key. The first line is always
/// treated as a header and discarded; blank lines and lines with the wrong
/// field count are skipped. Dates are not validated here: entries with
/// unparsable dates still show up in presence views and are dropped by the
/// range filter instead.
pub fn parse_csv(text: &str, kind: DatasetKind) -> KeyGroups {
    let mut groups = KeyGroups::new();

    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        let entry = match (kind, fields.as_slice()) {
            (DatasetKind::Habit, [date, habit]) => Entry {
                date: date.clone(),
                key: habit.clone(),
                value: None,
            },
            (DatasetKind::Health, [date, log, value]) => Entry {
                date: date.clone(),
                key: log.clone(),
                value: Some(value.clone()),
            },
            _ => {
                debug!("skipping line with {} fields: {line}", fields.len());
                continue;
            }
        };

        groups.entry(entry.key.clone()).or_default().push(entry);
    }

    groups
}

/// Splits a CSV line on commas, keeping commas inside double-quoted fields.
/// Surrounding quotes are stripped and each field is trimmed.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
        .into_iter()
        .map(|field| field.trim().to_string())
        .collect()
}
