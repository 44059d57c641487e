//! Summary statistics card, shown only while exactly one series is visible.

use dioxus::prelude::*;

use crate::core::format;
use crate::core::timefmt;
use crate::core::visibility;
use crate::viewer::ViewerState;

#[component]
pub fn StatsPanel(state: Signal<ViewerState>) -> Element {
    let s = state();
    let selected = visibility::displayed_stats(&s.series, &s.hidden)
        .map(|(series, stats)| (series.name.clone(), stats.clone()));

    rsx! {
        section { class: "viewer-card stats-card",
            div { class: "viewer-card__header",
                h2 { "Statistics" }
            }

            match selected {
                Some((name, stats)) => rsx! {
                    span { class: "viewer-card__meta", "{name}" }
                    ul { class: "stats-card__grid",
                        li {
                            span { class: "stats-card__label", "Minimum" }
                            span { class: "stats-card__value", "{format::format_temp_precise(stats.min)}" }
                        }
                        li {
                            span { class: "stats-card__label", "Average" }
                            span { class: "stats-card__value", "{format::format_temp_precise(stats.avg)}" }
                        }
                        li {
                            span { class: "stats-card__label", "Maximum" }
                            span { class: "stats-card__value", "{format::format_temp_precise(stats.max)}" }
                        }
                        li {
                            span { class: "stats-card__label", "Start" }
                            span { class: "stats-card__value", "{timefmt::day_time_label(stats.start)}" }
                        }
                        li {
                            span { class: "stats-card__label", "End" }
                            span { class: "stats-card__value", "{timefmt::day_time_label(stats.end)}" }
                        }
                        if let Some(count) = stats.count {
                            li {
                                span { class: "stats-card__label", "Readings" }
                                span { class: "stats-card__value", "{count}" }
                            }
                        }
                    }
                },
                None => rsx! {
                    p { class: "viewer-card__placeholder",
                        "Statistics appear while exactly one series is visible. Use the legend to narrow down."
                    }
                },
            }
        }
    }
}
