use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::config::PresentationPolicy;
use crate::data::aggregate::{Aggregates, CorrelationMatrix, PeriodDistribution, StationLevel};
use crate::data::stats::BoxSummary;
use crate::data::model::{DayType, Pollutant, Season, TimePeriod};
use crate::ui::map;
use crate::ui::metrics::NO_DATA;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// All charts below the metric boxes, top to bottom.
pub fn dashboard(ui: &mut Ui, agg: &Aggregates, policy: &PresentationPolicy) {
    ui.columns(2, |cols| {
        section(&mut cols[0], "Monthly PM2.5 trend", |ui| monthly_trend(ui, agg, policy));
        section(&mut cols[1], "Pollutant correlation", |ui| {
            correlation_heatmap(ui, &agg.correlation)
        });
    });
    ui.separator();

    ui.columns(2, |cols| {
        section(&mut cols[0], "Mean PM2.5 and PM10 per station", |ui| {
            station_bars(ui, &agg.station_levels, policy)
        });
        section(&mut cols[1], "PM2.5: weekday vs weekend", |ui| {
            let entries = DayType::ALL
                .iter()
                .filter_map(|d| Some((d.label().to_string(), *agg.day_type_pm25.get(d)?)))
                .collect();
            category_bars(ui, "day_type_pm25", entries, policy)
        });
    });
    ui.separator();

    ui.heading("PM2.5 and PM10 distribution: rush hour vs off-peak");
    ui.columns(2, |cols| {
        let pm25 = color::policy_color(&policy.colors.pm25);
        let pm10 = color::policy_color(&policy.colors.pm10);
        rush_hour_boxes(&mut cols[0], agg, Pollutant::Pm25, pm25);
        rush_hour_boxes(&mut cols[1], agg, Pollutant::Pm10, pm10);
    });
    ui.separator();

    ui.columns(3, |cols| {
        section(&mut cols[0], "Mean PM2.5 per season", |ui| {
            let entries = Season::ALL
                .iter()
                .filter_map(|s| Some((s.label().to_string(), *agg.seasonal_pm25.get(s)?)))
                .collect();
            category_bars(ui, "seasonal_pm25", entries, policy)
        });
        section(&mut cols[1], "Maximum PM2.5 per year", |ui| {
            let points = agg.annual_pm25.iter().map(|a| [a.year as f64, a.max_pm25]).collect();
            yearly_line(ui, "annual_max_pm25", points, policy)
        });
        section(&mut cols[2], "Mean PM2.5 per year", |ui| {
            let points = agg.annual_pm25.iter().map(|a| [a.year as f64, a.mean_pm25]).collect();
            yearly_line(ui, "annual_mean_pm25", points, policy)
        });
    });
    ui.separator();

    section(ui, "Station map (mean PM2.5)", |ui| {
        map::station_map(ui, &agg.station_map, policy)
    });
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.heading(title);
    add_contents(ui);
}

/// Common settings: the page scrolls, charts stay put.
fn fixed(plot: Plot) -> Plot {
    plot.height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
}

fn no_data(ui: &mut Ui) {
    ui.add_sized([ui.available_width(), CHART_HEIGHT], egui::Label::new(NO_DATA));
}

/// Axis formatter that shows `labels[i]` at integer position `i + offset`.
fn category_formatter(
    labels: Vec<String>,
    offset: f64,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 {
            return String::new();
        }
        let idx = pos - offset;
        if idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn monthly_trend(ui: &mut Ui, agg: &Aggregates, policy: &PresentationPolicy) {
    if agg.monthly_pm25.is_empty() {
        no_data(ui);
        return;
    }
    let color = color::policy_color(&policy.colors.pm25);
    let points: Vec<[f64; 2]> = agg
        .monthly_pm25
        .iter()
        .map(|(&m, &v)| [m as f64, v])
        .collect();
    let month_labels = (1..=12).map(|m| policy.month_label(m).to_string()).collect();

    fixed(Plot::new("monthly_pm25"))
        .include_x(1.0)
        .include_x(12.0)
        .include_y(0.0)
        .x_axis_label("Month")
        .y_axis_label("PM2.5 (µg/m³)")
        .x_axis_formatter(category_formatter(month_labels, 1.0))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).color(color).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).color(color).radius(4.0));
        });
}

fn correlation_heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    let n = Pollutant::ALL.len() as f32;
    let cell = 46.0;
    let margin = 48.0;
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(margin + cell * n), Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();
    let origin = rect.left_top();

    for (i, &row) in Pollutant::ALL.iter().enumerate() {
        let offset = cell * (i as f32 + 0.5);
        painter.text(
            origin + Vec2::new(margin - 4.0, margin + offset),
            Align2::RIGHT_CENTER,
            row.column(),
            font.clone(),
            text_color,
        );
        painter.text(
            origin + Vec2::new(margin + offset, margin - 4.0),
            Align2::CENTER_BOTTOM,
            row.column(),
            font.clone(),
            text_color,
        );

        for (j, &col) in Pollutant::ALL.iter().enumerate() {
            let min = origin + Vec2::new(margin + cell * j as f32, margin + cell * i as f32);
            let cell_rect = Rect::from_min_size(min, Vec2::splat(cell - 2.0));
            match corr.get(row, col) {
                Some(r) => {
                    let fill = color::correlation_color(r);
                    painter.rect_filled(cell_rect, 2.0, fill);
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{r:.2}"),
                        font.clone(),
                        color::contrast_text(fill),
                    );
                }
                None => {
                    painter.rect_filled(cell_rect, 2.0, ui.visuals().faint_bg_color);
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        "–",
                        font.clone(),
                        text_color,
                    );
                }
            }
        }
    }
}

/// Grouped horizontal bars, highest PM2.5 at the top.
fn station_bars(ui: &mut Ui, levels: &[StationLevel], policy: &PresentationPolicy) {
    if levels.is_empty() {
        no_data(ui);
        return;
    }
    let n = levels.len();
    let pm25_color = color::policy_color(&policy.colors.pm25);
    let pm10_color = color::policy_color(&policy.colors.pm10);

    let mut pm25_bars = Vec::with_capacity(n);
    let mut pm10_bars = Vec::with_capacity(n);
    for (i, level) in levels.iter().enumerate() {
        let pos = (n - 1 - i) as f64;
        if let Some(v) = level.mean_pm25 {
            pm25_bars.push(Bar::new(pos + 0.2, v).width(0.4).name(&level.station));
        }
        if let Some(v) = level.mean_pm10 {
            pm10_bars.push(Bar::new(pos - 0.2, v).width(0.4).name(&level.station));
        }
    }
    // Bottom-to-top order matches the bar positions.
    let names: Vec<String> = levels.iter().rev().map(|l| l.station.clone()).collect();

    fixed(Plot::new("station_levels"))
        .height(CHART_HEIGHT + 80.0)
        .legend(Legend::default())
        .include_x(0.0)
        .x_axis_label("Mean concentration (µg/m³)")
        .y_axis_formatter(category_formatter(names, 0.0))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(pm25_bars).horizontal().color(pm25_color).name("PM2.5"));
            plot_ui.bar_chart(BarChart::new(pm10_bars).horizontal().color(pm10_color).name("PM10"));
        });
}

/// One vertical bar per labelled category.
fn category_bars(ui: &mut Ui, id: &str, entries: Vec<(String, f64)>, policy: &PresentationPolicy) {
    if entries.is_empty() {
        no_data(ui);
        return;
    }
    let color = color::policy_color(&policy.colors.pm25);
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, v))| Bar::new(i as f64, *v).width(0.6).name(label).fill(color))
        .collect();
    let labels: Vec<String> = entries.into_iter().map(|(label, _)| label).collect();

    fixed(Plot::new(id))
        .include_y(0.0)
        .y_axis_label("PM2.5 (µg/m³)")
        .x_axis_formatter(category_formatter(labels, 0.0))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

fn yearly_line(ui: &mut Ui, id: &str, points: Vec<[f64; 2]>, policy: &PresentationPolicy) {
    if points.is_empty() {
        no_data(ui);
        return;
    }
    let color = color::policy_color(&policy.colors.pm25);
    fixed(Plot::new(id))
        .x_axis_label("Year")
        .y_axis_label("PM2.5 (µg/m³)")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{}", mark.value as i64)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).color(color).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).color(color).radius(4.0));
        });
}

fn rush_hour_boxes(ui: &mut Ui, agg: &Aggregates, pollutant: Pollutant, color: Color32) {
    ui.label(format!("{pollutant} (µg/m³)"));

    let select = |d: &PeriodDistribution| -> Option<BoxSummary> {
        match pollutant {
            Pollutant::Pm10 => d.pm10.summary(),
            _ => d.pm25.summary(),
        }
    };

    let mut boxes = Vec::new();
    let mut outliers = Vec::new();
    for (i, period) in TimePeriod::ALL.iter().enumerate() {
        let Some(summary) = agg.rush_hour.get(period).and_then(select) else {
            continue;
        };
        let x = i as f64;
        boxes.push(
            BoxElem::new(
                x,
                BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                ),
            )
            .name(period.label())
            .box_width(0.5)
            .whisker_width(0.3)
            .fill(color.gamma_multiply(0.5))
            .stroke(Stroke::new(1.5, color)),
        );
        outliers.extend(summary.outliers.iter().map(|&v| [x, v]));
    }

    if boxes.is_empty() {
        no_data(ui);
        return;
    }
    let labels = TimePeriod::ALL.iter().map(|p| p.label().to_string()).collect();

    fixed(Plot::new(format!("rush_hour_{pollutant}")))
        .include_x(-0.5)
        .include_x(1.5)
        .x_axis_formatter(category_formatter(labels, 0.0))
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            if !outliers.is_empty() {
                plot_ui.points(Points::new(PlotPoints::from(outliers)).color(color).radius(1.5));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: f64) -> egui_plot::GridMark {
        egui_plot::GridMark {
            value,
            step_size: 1.0,
        }
    }

    #[test]
    fn category_formatter_labels_integer_ticks_only() {
        let fmt = category_formatter(vec!["Jan".to_string(), "Feb".to_string()], 1.0);
        let range = 0.0..=13.0;
        assert_eq!(fmt(mark(1.0), &range), "Jan");
        assert_eq!(fmt(mark(2.0), &range), "Feb");
        assert_eq!(fmt(mark(1.5), &range), "");
        assert_eq!(fmt(mark(0.0), &range), "");
        assert_eq!(fmt(mark(3.0), &range), "");
    }
}
