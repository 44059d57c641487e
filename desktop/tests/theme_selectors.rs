#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that critical CSS selectors required by the desktop UI (the upload
  controls, trend chart, tables and export panels) remain present in the
  unified shared theme: ui/assets/theme/main.css
- Fail fast if a refactor accidentally drops or renames core classes,
  preventing a silent styling regression in packaged (embedded) desktop
  builds.

How it works:
- We compile-time embed the unified theme using `include_str!` pointing to
  the shared `ui/` location (mirrors the constant in `desktop/src/main.rs`).
- We assert presence of a curated set of selectors / tokens.
- If you intentionally rename or remove a selector:
    1. Update the Dioxus component markup.
    2. Adjust this test's REQUIRED_SELECTORS accordingly.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    // Buttons & shared card chrome
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".viewer-card {",
    ".viewer-card__header",
    ".viewer-card__meta",
    ".viewer-card__placeholder",
    // Upload controls
    ".upload-controls__bounds",
    ".upload-controls__actions",
    ".upload-controls__error",
    // Trend chart & legend
    ".trend-chart__canvas",
    ".trend-chart__legend",
    ".trend-chart__legend-entry--hidden",
    ".trend-chart__swatch",
    // Stats card
    ".stats-card__grid",
    ".stats-card__label",
    ".stats-card__value",
    // Hourly tables
    ".series-table {",
    ".series-table__empty",
    ".series-table__grid",
    // Export panel
    ".report-export__actions",
];

#[test]
fn required_selectors_are_present() {
    for selector in REQUIRED_SELECTORS {
        assert!(
            THEME_CSS.contains(selector),
            "Expected selector `{selector}` missing from ui/assets/theme/main.css"
        );
    }
}
