//! Formatting helpers for presenting readings.

pub fn format_temp(value: f64) -> String {
    format!("{value:.1} \u{b0}C")
}

pub fn format_temp_precise(value: f64) -> String {
    format!("{value:.2} \u{b0}C")
}
