use std::{io, path::PathBuf};

use crate::selection::Metric;

/// Błędy ładowania danych i obliczeń dashboardu.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Brak pliku albo nie da się go odczytać
    #[error("data unavailable: {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Plik odczytany, ale nie przetrwał ani jeden wiersz danych
    #[error("no usable rows in {path}")]
    EmptyTable { path: PathBuf },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column `{column}` missing in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("no {metric} reference row covers age {age}")]
    NoMatch { metric: Metric, age: u32 },

    #[error("invalid {what}: {value}")]
    InvalidMeasurement { what: &'static str, value: f64 },

    #[error("unknown {kind}: `{value}`")]
    UnknownSelection { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
