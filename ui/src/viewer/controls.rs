//! File selection, period bounds and the process/reset actions.

use dioxus::prelude::*;
use tracing::{error, info};

use crate::core::series::SelectedFile;
use crate::upload::{self, HttpEndpoint, PeriodBounds};
use crate::viewer::{ViewerState, MAX_FILES};

/// Desktop file inputs hand over full paths; the series key is the bare
/// filename.
fn file_label(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[component]
pub fn UploadControls(state: Signal<ViewerState>) -> Element {
    // Handlers below mutate the signal.
    let mut state = state;
    let s = state();
    let process_disabled = s.loading || s.files.is_empty();
    let process_label = if s.loading { "Processing…" } else { "Process" };

    let on_files = move |evt: FormEvent| {
        if let Some(engine) = evt.files() {
            spawn(async move {
                let mut picked = Vec::new();
                for name in engine.files().into_iter().take(MAX_FILES) {
                    if let Some(bytes) = engine.read_file(&name).await {
                        picked.push(SelectedFile {
                            name: file_label(&name).to_string(),
                            bytes,
                        });
                    }
                }
                state.write().files = picked;
            });
        }
    };

    let on_process = move |_| {
        let (files, bounds, generation) = {
            let mut st = state.write();
            if st.loading || st.files.is_empty() {
                return;
            }
            st.loading = true;
            st.error = None;
            st.generation += 1;
            (
                st.files.clone(),
                PeriodBounds::from_inputs(&st.range_start, &st.range_end),
                st.generation,
            )
        };

        spawn(async move {
            let endpoint = HttpEndpoint::from_env();
            let outcome = upload::run_batch(&endpoint, &files, &bounds).await;

            let mut st = state.write();
            if st.generation != generation {
                // Abandoned batch: a reset or newer batch owns the store now.
                info!("discarding stale upload batch");
                return;
            }
            match outcome {
                Ok(series) => {
                    info!(count = series.len(), "upload batch committed");
                    st.series = series;
                }
                Err(err) => {
                    error!(%err, "upload batch failed");
                    st.error = Some(err.to_string());
                }
            }
            st.loading = false;
        });
    };

    let on_reset = move |_| {
        state.write().reset();
    };

    rsx! {
        section { class: "viewer-card upload-controls",
            div { class: "viewer-card__header",
                h2 { "Files" }
                if !s.files.is_empty() {
                    span { class: "viewer-card__meta", "{s.files.len()} of {MAX_FILES} selected" }
                }
            }

            p { "Pick up to {MAX_FILES} exported HT-810 spreadsheets, bound the period if needed, then process the batch." }

            input {
                r#type: "file",
                multiple: true,
                accept: ".csv,.xls,.xlsx",
                onchange: on_files,
            }

            if !s.files.is_empty() {
                ul { class: "upload-controls__files",
                    for file in s.files.iter() {
                        li { "{file.name}" }
                    }
                }
            }

            div { class: "upload-controls__bounds",
                label { class: "upload-controls__bound",
                    span { "From" }
                    input {
                        r#type: "datetime-local",
                        value: "{s.range_start}",
                        oninput: move |evt| state.write().range_start = evt.value(),
                    }
                }
                label { class: "upload-controls__bound",
                    span { "To" }
                    input {
                        r#type: "datetime-local",
                        value: "{s.range_end}",
                        oninput: move |evt| state.write().range_end = evt.value(),
                    }
                }
            }

            div { class: "upload-controls__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: process_disabled,
                    onclick: on_process,
                    "{process_label}"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: on_reset,
                    "Reset"
                }
            }

            if let Some(message) = s.error.as_ref() {
                p { class: "upload-controls__error", "⚠️ {message}" }
            }
        }
    }
}
