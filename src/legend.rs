//! Legend text derivation: unit classification and per-rider legend lines.

/// Substring rules mapping a metric title to a unit suffix, in priority
/// order. First match wins; a title containing both "Stage" and "Career"
/// resolves to "stages" because "Stage" is listed first. The ordering is
/// load-bearing and must not be rearranged.
const UNIT_RULES: [(&str, &str); 6] = [
    ("Stage", "stages"),
    ("Tour de France Wins", "wins"),
    ("Grand Tour", "wins"),
    ("Monument", "wins"),
    ("World", "wins"),
    ("Career", "wins*"),
];

/// Classify a metric title into a unit suffix. Total: unknown titles map
/// to the empty string.
pub fn unit_label(title: &str) -> &'static str {
    UNIT_RULES
        .iter()
        .find(|(needle, _)| title.contains(needle))
        .map(|(_, unit)| *unit)
        .unwrap_or("")
}

/// Format a metric value for display: whole numbers without a decimal
/// point, fractional values as-is.
pub fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One legend line: `"{name}: {value} {unit}"`, without the trailing
/// space when the unit is empty.
pub fn legend_line(name: &str, value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{}: {}", name, fmt_value(value))
    } else {
        format!("{}: {} {}", name, fmt_value(value), unit)
    }
}
