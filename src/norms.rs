//! Regulatory pollutant norms.
//!
//! Single source for both the percent-of-norm figures in formatted
//! snapshots and the user-facing `types` reference text. Values are
//! the Polish Chief Inspectorate for Environmental Protection limits
//! in μg/m³ per averaging period.

/// Pollutant code, limit, human description, averaging period.
const NORMS: &[(&str, f64, &str, &str)] = &[
    (
        "PM10",
        50.0,
        "particulate matter 10, inhalable particles with diameters of 10 micrometers and smaller",
        "day",
    ),
    (
        "PM2.5",
        20.0,
        "particulate matter 2.5, fine inhalable particles with diameters of 2.5 micrometers and smaller",
        "year",
    ),
    ("CO", 10_000.0, "carbon monoxide", "8 hour"),
    ("SO2", 125.0, "sulfur dioxide", "day"),
    ("NO2", 40.0, "nitrogen dioxide", "year"),
    ("C6H6", 5.0, "benzene", "year"),
    ("O3", 120.0, "ozone", "8 hour"),
];

/// Regulatory limit for a pollutant code, if one is tabulated.
pub fn lookup(key: &str) -> Option<f64> {
    NORMS.iter().find(|(k, ..)| *k == key).map(|(_, v, ..)| *v)
}

/// The `types` help text, rendered from the norm table.
pub fn reference_text() -> String {
    let mut out = String::new();
    for (key, limit, description, period) in NORMS {
        out.push_str(&format!(
            "{} - {}; norm: {} μg/m3/{}\n\n",
            key,
            description,
            group_thousands(*limit),
            period
        ));
    }
    out.push_str("Norms: Polish Chief Inspectorate for Environmental Protection; www.gios.gov.pl\n\n");
    out.push_str("Units: microgram / cubic meter / averaging period");
    out
}

// "10000" reads badly in help text; GIOŚ prints "10 000".
fn group_thousands(limit: f64) -> String {
    let digits = format!("{limit:.0}");
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}
