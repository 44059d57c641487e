use dioxus::prelude::*;

use crate::viewer::{ExportPanel, StatsPanel, TablesPanel, TrendChart, UploadControls, ViewerState};

#[component]
pub fn Viewer() -> Element {
    let state = use_signal(ViewerState::default);

    rsx! {
        section { class: "page page-viewer",
            h1 { "HT-810 temperature logs" }
            p {
                "Upload exported datalogger spreadsheets, align their readings on one chart, filter by period and export a report."
            }

            UploadControls { state }
            TrendChart { state }

            div { class: "viewer__panels",
                StatsPanel { state }
                ExportPanel { state }
            }

            TablesPanel { state }
        }
    }
}
