//! Snapshot rendering.

use crate::models::Reading;
use crate::norms;

const NO_DATA: &str = "no data";

/// Renders one line per pollutant: key and value columns right-aligned
/// to the widest entry in this snapshot, values to one decimal place,
/// plus a percent-of-norm figure when the pollutant has a tabulated norm
/// and the value is numeric. Column widths are computed per snapshot.
pub fn format_readings(entries: &[Reading]) -> String {
    let values: Vec<String> = entries
        .iter()
        .map(|r| match r.value {
            Some(v) => format!("{v:.1}"),
            None => NO_DATA.to_string(),
        })
        .collect();

    let key_width = entries.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let value_width = values.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (reading, value) in entries.iter().zip(&values) {
        out.push_str(&format!(
            "{:>key_width$} : {:>value_width$}",
            reading.key, value
        ));
        if let (Some(v), Some(norm)) = (reading.value, norms::lookup(&reading.key)) {
            out.push_str(&format!(" : {}%", (v / norm * 100.0).round()));
        }
        out.push('\n');
    }
    out
}
