use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    error::{DashboardError, Result},
    selection::{Choice, Country},
};

#[derive(Debug, Deserialize)]
struct TemperatureRecord {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Max_Tdry")]
    max_tdry: f64,
    #[serde(rename = "Min_Tdry")]
    min_tdry: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthTemperature {
    pub month: String,
    pub max: f64,
    pub min: f64,
}

/// Miesięczne temperatury jednego kraju, w kolejności pliku.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TemperatureSeries {
    pub months: Vec<MonthTemperature>,
}

impl TemperatureSeries {
    pub fn parse(text: &str, country: Country, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| DashboardError::Csv { path: origin.to_path_buf(), source })?;
        for column in ["Country", "Month", "Max_Tdry", "Min_Tdry"] {
            if !headers.iter().any(|h| h == column) {
                return Err(DashboardError::MissingColumn { path: origin.to_path_buf(), column });
            }
        }

        let mut skipped = 0usize;
        let mut months = Vec::new();
        for record in reader.deserialize::<TemperatureRecord>() {
            match record {
                Ok(r) if r.country == country.label() => months.push(MonthTemperature {
                    month: r.month,
                    max: r.max_tdry,
                    min: r.min_tdry,
                }),
                Ok(_) => {}
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{}: skipped {} malformed rows", origin.display(), skipped);
        }
        if months.is_empty() {
            return Err(DashboardError::EmptyTable { path: origin.to_path_buf() });
        }
        Ok(Self { months })
    }

    /// Zakres osi Y obejmujący obie serie, z zapasem 2°C.
    pub fn bounds(&self) -> [f64; 2] {
        let lo = self.months.iter().map(|m| m.min.min(m.max)).fold(f64::INFINITY, f64::min);
        let hi = self.months.iter().map(|m| m.max.max(m.min)).fold(f64::NEG_INFINITY, f64::max);
        [lo.floor() - 2.0, hi.ceil() + 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "Country,Month,Max_Tdry,Min_Tdry\n\
                        USA,Jan,5.5,-3.0\n\
                        China,Jan,2.0,-8.5\n\
                        USA,Feb,7.0,abc\n\
                        USA,Mar,12.25,1.5\n";

    #[test]
    fn filters_by_country_in_file_order() {
        let s = TemperatureSeries::parse(DATA, Country::Usa, Path::new("t.csv")).unwrap();
        let months: Vec<&str> = s.months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["Jan", "Mar"]);
        assert_eq!(s.months[1].max, 12.25);
        assert_eq!(s.bounds(), [-5.0, 15.0]);
    }

    #[test]
    fn country_without_rows_is_empty_table() {
        let only_usa = "Country,Month,Max_Tdry,Min_Tdry\nUSA,Jan,1,0\n";
        let err = TemperatureSeries::parse(only_usa, Country::China, Path::new("t.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyTable { .. }));
    }
}
