//! Report export panel.

use dioxus::prelude::*;

use crate::report;
use crate::viewer::ViewerState;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[component]
pub fn ExportPanel(state: Signal<ViewerState>) -> Element {
    let s = state();

    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => {
            Some(("viewer-card__meta".to_string(), format!("{label}…")))
        }
        ExportStatus::Done(message) => Some((
            "viewer-card__meta viewer-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "viewer-card__meta viewer-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let pdf_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            let snapshot = state();
            if snapshot.series.is_empty() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Rendering report"));
            spawn(async move {
                let range = snapshot.range();
                let outcome =
                    report::compose_report(&snapshot.series, &snapshot.hidden, &range).await;
                match outcome {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => status_signal.set(ExportStatus::Error(err.to_string())),
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        section { class: "viewer-card report-export",
            div { class: "viewer-card__header",
                h2 { "Export" }
            }

            if s.series.is_empty() {
                p { class: "viewer-card__placeholder", "The report unlocks once a batch has been processed." }
            } else {
                p {
                    "Assemble a paginated PDF with the chart, the statistics block and every visible hourly table."
                }

                div { class: "report-export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: pdf_handler,
                        "Export PDF report"
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}
