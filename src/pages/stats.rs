//! Stats page: pages read per month of a year, or per day of a month.
//!
//! Buckets are drawn as a plain bar table scaled against `peak_pages`, with
//! the goal shown as a reference row.

use chrono::{Datelike, Utc};
use leptos::prelude::*;

use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::Stats;
use crate::state::stats::{MONTHS_PER_YEAR, StatsPeriod, load_stats, peak_pages};
use crate::state::ui::UiState;
use crate::util::task::spawn;

/// Bar width in percent of the peak value.
fn bar_width(pages: i64, peak: i64) -> String {
    if peak <= 0 {
        return "0%".to_owned();
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = (pages as f64 / peak as f64 * 100.0).clamp(0.0, 100.0);
    format!("{percent:.1}%")
}

#[component]
pub fn StatsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let today = Utc::now();
    let daily = RwSignal::new(false);
    let year = RwSignal::new(today.year());
    let month = RwSignal::new(today.month());
    let stats = RwSignal::new(Stats::default());

    // Refetch whenever the period controls change.
    Effect::new(move || {
        let period = if daily.get() {
            StatsPeriod::Daily { year: year.get(), month: month.get() }
        } else {
            StatsPeriod::Monthly { year: year.get() }
        };
        let api = api.clone();
        spawn(async move {
            match load_stats(&api, period).await {
                Ok(loaded) => stats.set(loaded),
                Err(notice) => push_notice(ui, notice),
            }
        });
    });

    view! {
        <section class="stats-page">
            <h1>"Reading stats"</h1>
            <div class="stats-page__controls">
                <select on:change=move |ev| daily.set(event_target_value(&ev) == "daily")>
                    <option value="monthly">"By month"</option>
                    <option value="daily">"By day"</option>
                </select>
                <input
                    type="number"
                    prop:value=move || year.get().to_string()
                    on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse() {
                            year.set(value);
                        }
                    }
                />
                <Show when=move || daily.get()>
                    <select on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse() {
                            month.set(value);
                        }
                    }>
                        {(1..=MONTHS_PER_YEAR)
                            .map(|m| view! { <option value=m.to_string() selected=move || month.get() == m>{m}</option> })
                            .collect_view()}
                    </select>
                </Show>
            </div>
            <table class="stats-chart">
                <tbody>
                    <tr class="stats-chart__goal">
                        <th>"Goal"</th>
                        <td>{move || stats.get().goal}</td>
                    </tr>
                    {move || {
                        let current = stats.get();
                        let peak = peak_pages(&current);
                        current
                            .progress
                            .into_iter()
                            .map(|point| {
                                view! {
                                    <tr>
                                        <th>{point.date}</th>
                                        <td>
                                            <div class="stats-chart__bar" style:width=bar_width(point.pages, peak)></div>
                                            <span>{point.pages}</span>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
