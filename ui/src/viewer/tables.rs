//! Per-series hourly tables over the server-resampled readings.

use dioxus::prelude::*;

use crate::core::format;
use crate::core::resampled::{resampled_view, TableView};
use crate::viewer::ViewerState;

#[component]
pub fn TablesPanel(state: Signal<ViewerState>) -> Element {
    let s = state();

    if s.series.is_empty() {
        return rsx! {
            section { class: "viewer-card series-tables",
                div { class: "viewer-card__header",
                    h2 { "Hourly readings" }
                }
                p { class: "viewer-card__placeholder",
                    "Each processed file gets its own hourly table here."
                }
            }
        };
    }

    let tables: Vec<TableView> = resampled_view(&s.series, &s.range())
        .into_iter()
        .filter(|table| !s.hidden.contains(&table.name))
        .collect();

    rsx! {
        section { class: "viewer-card series-tables",
            div { class: "viewer-card__header",
                h2 { "Hourly readings" }
                span { class: "viewer-card__meta", "{tables.len()} visible" }
            }

            for table in tables.into_iter() {
                {render_table(table)}
            }
        }
    }
}

fn render_table(table: TableView) -> Element {
    rsx! {
        div { class: "series-table",
            h3 { class: "series-table__title",
                span {
                    class: "trend-chart__swatch",
                    style: "background: {table.color};",
                }
                "{table.name}"
            }

            if table.samples.is_empty() {
                p { class: "series-table__empty", "No data for the selected period" }
            } else {
                table { class: "series-table__grid",
                    thead {
                        tr {
                            th { "Time" }
                            th { "Temperature" }
                        }
                    }
                    tbody {
                        for sample in table.samples.iter() {
                            tr {
                                td { "{sample.time_label}" }
                                td { "{format::format_temp(sample.temperature)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
