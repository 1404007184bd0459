use log::{info, warn};
use serde::Serialize;

use crate::{
    bmr::{self, BmrEstimate},
    data::DataStore,
    error::Result,
    issues::IssueSummary,
    reference::ReferenceTable,
    resolver::{self, ResolveMode},
    selection::{Choice, Metric, Selection},
    series::{BmrSeries, SeriesPoint, value_points},
    weather::TemperatureSeries,
};

/// Wynik panelu; błąd to komunikat wyświetlany w miejscu wykresu.
pub type Panel<T> = std::result::Result<T, String>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub mode: ResolveMode,
    pub weather: Panel<TemperatureSeries>,
    pub anthropometrics: Panel<BmrEstimate>,
    pub bmr_series: Panel<Vec<SeriesPoint>>,
    pub height_series: Panel<Vec<LabeledValue>>,
    pub weight_series: Panel<Vec<LabeledValue>>,
    pub issues: Panel<IssueSummary>,
}

fn panel<T>(name: &str, result: Result<T>) -> Panel<T> {
    result.map_err(|e| {
        warn!("{} panel: {}", name, e);
        e.to_string()
    })
}

fn labeled(table: &ReferenceTable) -> Vec<LabeledValue> {
    value_points(table)
        .map(|(label, value)| LabeledValue { label: label.to_string(), value })
        .collect()
}

impl Report {
    /// Jeden pełny przebieg po "Submit"; każdy panel liczony niezależnie.
    pub fn build(store: &mut DataStore, selection: &Selection, mode: ResolveMode) -> Self {
        info!(
            "submit: country={} age={} gender={} brand={} source={} mode={}",
            selection.country.label(),
            selection.age,
            selection.gender.label(),
            selection.brand.label(),
            selection.source.label(),
            mode
        );

        let weather = panel("weather", store.load_temperature(selection.country));

        let height = panel("height", store.load_reference(selection.country, selection.gender, Metric::Height));
        let weight = panel("weight", store.load_reference(selection.country, selection.gender, Metric::Weight));
        let both = match (&height, &weight) {
            (Ok(h), Ok(w)) => Ok((h, w)),
            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
        };

        let anthropometrics = both.clone().and_then(|(h, w)| {
            panel(
                "anthropometric",
                resolver::resolve(h, w, selection.age, mode, selection.country)
                    .and_then(|r| bmr::estimate(r, selection.age, selection.gender)),
            )
        });
        let bmr_series = both.map(|(h, w)| BmrSeries::new(h, w, selection.gender).collect());
        let height_series = height.as_ref().map(labeled).map_err(Clone::clone);
        let weight_series = weight.as_ref().map(labeled).map_err(Clone::clone);

        let issues = panel("issues", store.load_issues(selection.source, selection.country));

        Self {
            selection: selection.clone(),
            mode,
            weather,
            anthropometrics,
            bmr_series,
            height_series,
            weight_series,
            issues,
        }
    }
}
