//! Tabular export of bache records

use bacheo_core::models::BacheRecord;

/// Column order of the CSV export
pub const CSV_HEADERS: [&str; 11] = [
    "noBache",
    "calle",
    "entreCalles",
    "status",
    "forma",
    "area",
    "medidas",
    "lat",
    "lng",
    "curbSide",
    "createdAt",
];

/// Render records as CSV, one row per record after the header row.
///
/// Cross streets are joined with `" y "` and measurements with `" | "`.
/// Area is rounded to two decimals, as shown on the form.
pub fn to_csv(records: &[BacheRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for record in records {
        let medidas: Vec<String> = record.medidas().iter().map(|m| m.to_string()).collect();
        let row = [
            record.no_bache.to_string(),
            record.street.calle.clone(),
            record.street.entre_calles.join(" y "),
            record.status.to_string(),
            record.forma().to_string(),
            format!("{:.2}", record.area()),
            medidas.join(" | "),
            record.coordenadas.lat.to_string(),
            record.coordenadas.lng.to_string(),
            record.curb_side.map(|s| s.to_string()).unwrap_or_default(),
            record.created_at.to_rfc3339(),
        ];
        lines.push(row.iter().map(|v| escape(v)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

/// Quote a field when it holds a quote, a comma or a line break
fn escape(value: &str) -> String {
    let doubled = value.replace('"', "\"\"");
    if doubled.contains(|c: char| matches!(c, '"' | ',' | '\n' | '\r')) {
        format!("\"{}\"", doubled)
    } else {
        doubled
    }
}
