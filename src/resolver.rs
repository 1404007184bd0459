use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::{
    error::{DashboardError, Result},
    reference::ReferenceTable,
    selection::{Country, Metric},
};

/// Strategia doboru wiersza tabeli do wieku użytkownika.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveMode {
    /// Pierwszy wiersz, którego górna granica wieku >= wiek.
    #[default]
    FirstMatch,
    /// Średnia kolumny percentyla z całej tabeli; wiek jest ignorowany.
    Aggregate,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolveMode::FirstMatch => "first-match",
            ResolveMode::Aggregate => "aggregate",
        })
    }
}

impl FromStr for ResolveMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-match" | "first_match" | "first" => Ok(ResolveMode::FirstMatch),
            "aggregate" | "mean" => Ok(ResolveMode::Aggregate),
            _ => Err(DashboardError::UnknownSelection { kind: "mode", value: s.to_string() }),
        }
    }
}

/// Kolumna statystyki dla trybu agregującego. USA i pozostałe kraje mają
/// różne indeksy; tak jest w danych źródłowych i tak zostaje.
pub fn aggregate_column(country: Country) -> usize {
    match country {
        Country::Usa => 8,
        _ => 7,
    }
}

/// Para (wzrost, waga) wybrana dla jednego zapytania.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedAnthropometrics {
    pub height_cm: f64,
    pub weight_kg: f64,
}

pub fn first_match(table: &ReferenceTable, age: u32) -> Option<f64> {
    table
        .rows
        .iter()
        .find(|row| row.age_label.upper >= age)
        .map(|row| row.representative_value)
}

pub fn column_mean(table: &ReferenceTable, column: usize) -> Option<f64> {
    let values: Vec<f64> = table.rows.iter().filter_map(|r| r.statistic(column)).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Wartość z jednej tabeli; brak dopasowania to `NoMatch`, nigdy 0.
pub fn resolve_value(
    table: &ReferenceTable,
    metric: Metric,
    age: u32,
    mode: ResolveMode,
    country: Country,
) -> Result<f64> {
    let value = match mode {
        ResolveMode::FirstMatch => first_match(table, age),
        ResolveMode::Aggregate => column_mean(table, aggregate_column(country)),
    };
    value.ok_or(DashboardError::NoMatch { metric, age })
}

pub fn resolve(
    height: &ReferenceTable,
    weight: &ReferenceTable,
    age: u32,
    mode: ResolveMode,
    country: Country,
) -> Result<ResolvedAnthropometrics> {
    Ok(ResolvedAnthropometrics {
        height_cm: resolve_value(height, Metric::Height, age, mode, country)?,
        weight_kg: resolve_value(weight, Metric::Weight, age, mode, country)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn decades() -> ReferenceTable {
        ReferenceTable::parse(
            "title\nAge,n,Mean,p5,p10,p15,p25,p50,p75\n\
             0 9,10,120,1,1,1,1,100,130\n\
             10 19,10,160,1,1,1,1,110,150\n\
             20 29,10,175,1,1,1,1,120,170\n",
            Path::new("decades.csv"),
        )
        .unwrap()
    }

    #[test]
    fn first_match_picks_covering_row() {
        let t = decades();
        assert_eq!(first_match(&t, 15), Some(160.0));
        assert_eq!(first_match(&t, 5), Some(120.0));
        assert_eq!(first_match(&t, 19), Some(160.0));
        assert_eq!(first_match(&t, 200), None);
    }

    #[test]
    fn out_of_range_age_is_explicit_no_match() {
        let t = decades();
        let err = resolve_value(&t, Metric::Height, 200, ResolveMode::FirstMatch, Country::Usa)
            .unwrap_err();
        assert!(matches!(err, DashboardError::NoMatch { metric: Metric::Height, age: 200 }));
    }

    #[test]
    fn aggregate_ignores_age_and_uses_country_column() {
        let t = decades();
        let usa_a = resolve_value(&t, Metric::Height, 5, ResolveMode::Aggregate, Country::Usa).unwrap();
        let usa_b = resolve_value(&t, Metric::Height, 99, ResolveMode::Aggregate, Country::Usa).unwrap();
        assert_eq!(usa_a, usa_b);
        assert_eq!(usa_a, (130.0 + 150.0 + 170.0) / 3.0);

        let china = resolve_value(&t, Metric::Height, 5, ResolveMode::Aggregate, Country::China).unwrap();
        assert_eq!(china, 110.0);
    }

    #[test]
    fn aggregate_without_column_is_no_match() {
        let t = ReferenceTable::parse("title\nAge,n,Mean\n20 29,1,170\n", Path::new("t.csv")).unwrap();
        assert!(column_mean(&t, aggregate_column(Country::Usa)).is_none());
    }

    #[test]
    fn resolve_returns_pair() {
        let t = decades();
        let r = resolve(&t, &t, 25, ResolveMode::FirstMatch, Country::China).unwrap();
        assert_eq!(r, ResolvedAnthropometrics { height_cm: 175.0, weight_kg: 175.0 });
    }

    #[test]
    fn mode_parses_from_cli_text() {
        assert_eq!("aggregate".parse::<ResolveMode>().unwrap(), ResolveMode::Aggregate);
        assert_eq!("First-Match".parse::<ResolveMode>().unwrap(), ResolveMode::FirstMatch);
        assert!("median".parse::<ResolveMode>().is_err());
    }
}
