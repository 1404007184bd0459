use serde::Serialize;
use std::{iter::Zip, slice::Iter};

use crate::{
    bmr::mifflin_st_jeor,
    reference::{AgeLabel, ReferenceRow, ReferenceTable},
    selection::Gender,
};

/// Wiek zastępczy dla otwartej grupy "90 i więcej" (etykieta z jedną liczbą).
pub const OPEN_ENDED_PROXY_AGE: f64 = 90.0;

/// Zakresy osi Y wykresów.
pub const BMR_AXIS: [f64; 2] = [800.0, 2000.0];
pub const HEIGHT_AXIS: [f64; 2] = [100.0, 200.0];
pub const WEIGHT_AXIS: [f64; 2] = [0.0, 110.0];

/// Środek zakresu, a dla pojedynczej liczby zawsze 90.
pub fn proxy_age(label: &AgeLabel) -> f64 {
    if label.is_range {
        (f64::from(label.lower) + f64::from(label.upper)) / 2.0
    } else {
        OPEN_ENDED_PROXY_AGE
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub proxy_age: f64,
    pub bmr: f64,
}

/// Leniwa, wielokrotnie odtwarzalna (Clone) sekwencja punktów BMR.
#[derive(Clone)]
pub struct BmrSeries<'a> {
    rows: Zip<Iter<'a, ReferenceRow>, Iter<'a, ReferenceRow>>,
    gender: Gender,
}

impl<'a> BmrSeries<'a> {
    /// Tabele wzrostu i wagi muszą być wyrównane wierszami; nadmiarowe
    /// wiersze dłuższej tabeli są pomijane.
    pub fn new(height: &'a ReferenceTable, weight: &'a ReferenceTable, gender: Gender) -> Self {
        Self { rows: height.rows.iter().zip(weight.rows.iter()), gender }
    }
}

impl Iterator for BmrSeries<'_> {
    type Item = SeriesPoint;

    fn next(&mut self) -> Option<SeriesPoint> {
        let (h, w) = self.rows.next()?;
        let age = proxy_age(&h.age_label);
        Some(SeriesPoint {
            label: h.age_label.text.clone(),
            proxy_age: age,
            bmr: mifflin_st_jeor(h.representative_value, w.representative_value, age, self.gender),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for BmrSeries<'_> {}

/// (etykieta, wartość) dla każdego wiersza tabeli.
pub fn value_points(table: &ReferenceTable) -> impl Iterator<Item = (&str, f64)> + Clone + '_ {
    table
        .rows
        .iter()
        .map(|r| (r.age_label.text.as_str(), r.representative_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(text: &str) -> ReferenceTable {
        ReferenceTable::parse(text, Path::new("t.csv")).unwrap()
    }

    #[test]
    fn midpoint_rule() {
        assert_eq!(proxy_age(&AgeLabel::parse("20 29").unwrap()), 24.5);
        assert_eq!(proxy_age(&AgeLabel::parse("90").unwrap()), 90.0);
        // otwarta grupa z inną liczbą też dostaje 90
        assert_eq!(proxy_age(&AgeLabel::parse("80").unwrap()), 90.0);
    }

    #[test]
    fn series_length_is_shorter_table() {
        let h = parse("t\nAge,n,Mean\n20 29,1,176\n30 39,1,175\n90,1,170\n");
        let w = parse("t\nAge,n,Mean\n20 29,1,80\n30 39,1,85\n");
        let series = BmrSeries::new(&h, &w, Gender::Male);
        assert_eq!(series.len(), 2);
        assert_eq!(series.count(), 2);
    }

    #[test]
    fn series_matches_direct_formula_and_restarts() {
        let h = parse("t\nAge,n,Mean\n20 29,1,176\n90,1,170\n");
        let w = parse("t\nAge,n,Mean\n20 29,1,80\n90,1,72\n");
        let series = BmrSeries::new(&h, &w, Gender::Female);

        let first: Vec<SeriesPoint> = series.clone().collect();
        let again: Vec<SeriesPoint> = series.collect();
        assert_eq!(first, again);

        assert_eq!(first[0].label, "20 29");
        assert_eq!(first[0].bmr, mifflin_st_jeor(176.0, 80.0, 24.5, Gender::Female));
        assert_eq!(first[1].proxy_age, 90.0);
        assert_eq!(first[1].bmr, mifflin_st_jeor(170.0, 72.0, 90.0, Gender::Female));
    }

    #[test]
    fn value_points_follow_rows() {
        let h = parse("t\nAge,n,Mean\n20 29,1,176\n30 39,1,175\n");
        let pts: Vec<(&str, f64)> = value_points(&h).collect();
        assert_eq!(pts, vec![("20 29", 176.0), ("30 39", 175.0)]);
    }
}
