use eframe::egui::{self, Align, Layout, RichText, Stroke, Ui};

use crate::color;
use crate::config::PresentationPolicy;
use crate::data::aggregate::{Aggregates, DailyExtreme, ExtremeBand, Metric, Summary};

pub const NO_DATA: &str = "No data";
pub const UNAVAILABLE: &str = "Data not available";

/// Render a concentration metric, or the matching placeholder.
pub fn format_concentration(metric: &Metric<f64>) -> String {
    match metric {
        Metric::Value(v) => format!("{v:.2} µg/m³"),
        Metric::NoData => NO_DATA.to_string(),
        Metric::Unavailable => UNAVAILABLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

fn metric_tile(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(title);
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

pub fn headline_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(4, |cols| {
        metric_tile(&mut cols[0], "Mean PM2.5", format_concentration(&summary.mean_pm25));
        metric_tile(&mut cols[1], "Mean PM10", format_concentration(&summary.mean_pm10));
        metric_tile(&mut cols[2], "Stations selected", summary.station_count.to_string());
        metric_tile(&mut cols[3], "Records", summary.record_count.to_string());
    });
}

// ---------------------------------------------------------------------------
// Extreme-day boxes
// ---------------------------------------------------------------------------

fn highlight_box(ui: &mut Ui, policy: &PresentationPolicy, title: &str, value: &str, subtitle: &str) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(2.0, color::policy_color(&policy.colors.highlight)))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.set_min_height(110.0);
            ui.with_layout(Layout::top_down(Align::Center), |ui: &mut Ui| {
                ui.strong(title);
                ui.add_space(6.0);
                ui.label(RichText::new(value).size(22.0).strong());
                ui.label(subtitle);
            });
        });
}

fn day_box(ui: &mut Ui, policy: &PresentationPolicy, title: &str, day: &Metric<DailyExtreme>) {
    match day {
        Metric::Value(d) => highlight_box(
            ui,
            policy,
            title,
            &d.date.format("%Y-%m-%d").to_string(),
            &format!("PM2.5: {:.2} µg/m³", d.mean_pm25),
        ),
        Metric::NoData => highlight_box(ui, policy, title, NO_DATA, ""),
        Metric::Unavailable => highlight_box(ui, policy, title, UNAVAILABLE, ""),
    }
}

fn temperature_box(
    ui: &mut Ui,
    policy: &PresentationPolicy,
    title: &str,
    comparator: &str,
    band: &Metric<ExtremeBand>,
) {
    match band {
        Metric::Value(b) => {
            let title = format!("{title} {comparator} {:.1}°C", b.threshold);
            let value = format_concentration(&Metric::from_option(b.mean_pm25));
            highlight_box(ui, policy, &title, &value, "")
        }
        Metric::NoData => highlight_box(ui, policy, title, NO_DATA, ""),
        Metric::Unavailable => highlight_box(ui, policy, title, UNAVAILABLE, ""),
    }
}

pub fn extremes_row(ui: &mut Ui, agg: &Aggregates, policy: &PresentationPolicy) {
    ui.columns(4, |cols| {
        day_box(&mut cols[0], policy, "Cleanest day", &agg.cleanest_day);
        day_box(&mut cols[1], policy, "Dirtiest day", &agg.dirtiest_day);
        temperature_box(
            &mut cols[2],
            policy,
            "Mean PM2.5, coldest",
            "≤",
            &agg.temperature_extremes.cold,
        );
        temperature_box(
            &mut cols[3],
            policy,
            "Mean PM2.5, hottest",
            "≥",
            &agg.temperature_extremes.hot,
        );
    });
}
