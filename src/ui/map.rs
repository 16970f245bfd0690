use eframe::egui::{Align2, Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color;
use crate::config::{AirQualityBand, PresentationPolicy};
use crate::data::aggregate::StationMarker;
use crate::ui::metrics::NO_DATA;

/// Legend entry for one band, e.g. "Moderate (35–75]".
fn band_legend(policy: &PresentationPolicy, band: AirQualityBand) -> String {
    match band {
        AirQualityBand::Good => format!("{} (≤ {})", band.label(), policy.good_max),
        AirQualityBand::Moderate => format!(
            "{} ({}–{}]",
            band.label(),
            policy.good_max,
            policy.moderate_max
        ),
        AirQualityBand::Poor => format!("{} (> {})", band.label(), policy.moderate_max),
    }
}

/// Station positions coloured by the band of their mean PM2.5.
pub fn station_map(ui: &mut Ui, markers: &[StationMarker], policy: &PresentationPolicy) {
    if markers.is_empty() {
        ui.label(NO_DATA);
        return;
    }

    Plot::new("station_map")
        .height(380.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for band in AirQualityBand::ALL {
                let points: Vec<[f64; 2]> = markers
                    .iter()
                    .filter(|m| m.mean_pm25.map(|v| policy.classify(v)) == Some(band))
                    .map(|m| [m.longitude, m.latitude])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(8.0)
                        .color(color::band_color(policy, band))
                        .name(band_legend(policy, band)),
                );
            }

            let unmeasured: Vec<[f64; 2]> = markers
                .iter()
                .filter(|m| m.mean_pm25.is_none())
                .map(|m| [m.longitude, m.latitude])
                .collect();
            if !unmeasured.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(unmeasured))
                        .radius(6.0)
                        .color(Color32::GRAY)
                        .name(NO_DATA),
                );
            }

            for m in markers {
                let label = match m.mean_pm25 {
                    Some(v) => format!("{} ({v:.1})", m.station),
                    None => m.station.clone(),
                };
                plot_ui.text(
                    Text::new(PlotPoint::new(m.longitude, m.latitude + 0.012), label)
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
