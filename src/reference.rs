use log::{debug, warn};
use serde::Serialize;
use std::{fmt, path::Path};

use crate::error::{DashboardError, Result};

/// Kolumna z wartością używaną w trybie "pierwszy pasujący wiersz".
pub const REPRESENTATIVE_COLUMN: usize = 2;

/// Etykieta grupy wieku, np. "20 29" (zakres) albo "90" (pojedynczy wiek).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgeLabel {
    pub text: String,
    pub lower: u32,
    pub upper: u32,
    pub is_range: bool,
}

impl AgeLabel {
    /// Zbiera liczby całkowite z etykiety; słowa typu "and over" są ignorowane.
    pub fn parse(text: &str) -> Option<Self> {
        let numbers: Vec<u32> = text
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter_map(|tok| tok.trim_end_matches('+').parse().ok())
            .collect();

        let (lower, upper, is_range) = match numbers.as_slice() {
            [] => return None,
            [single] => (*single, *single, false),
            [lower, upper, ..] => (*lower, *upper, true),
        };
        if lower > upper {
            return None;
        }
        Some(Self { text: text.trim().to_string(), lower, upper, is_range })
    }
}

impl fmt::Display for AgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub age_label: AgeLabel,
    pub representative_value: f64,
    #[serde(skip)]
    pub fields: Vec<String>,
}

impl ReferenceRow {
    fn from_fields(fields: Vec<String>) -> Option<Self> {
        if fields.len() <= REPRESENTATIVE_COLUMN {
            return None;
        }
        let age_label = AgeLabel::parse(&fields[0])?;
        let representative_value = parse_number(&fields[REPRESENTATIVE_COLUMN])?;
        Some(Self { age_label, representative_value, fields })
    }

    /// Dowolna kolumna statystyki, o ile jest liczbą.
    pub fn statistic(&self, column: usize) -> Option<f64> {
        self.fields.get(column).and_then(|f| parse_number(f))
    }
}

/// Uporządkowana rosnąco (po górnej granicy wieku) tabela referencyjna.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReferenceTable {
    pub headers: Vec<String>,
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pierwsza linia to tytuł (pomijany), druga to nagłówek kolumn, dalej
    /// wiersze danych. `origin` służy tylko do komunikatów.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        // linia tytułu
        let body = match text.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| DashboardError::Csv { path: origin.to_path_buf(), source })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for record in reader.records() {
            // więcej pól niż w nagłówku: zły wiersz
            let parsed = record
                .ok()
                .filter(|r| r.len() <= headers.len())
                .and_then(|r| ReferenceRow::from_fields(r.iter().map(str::to_string).collect()));
            match parsed {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{}: skipped {} malformed rows", origin.display(), skipped);
        }
        if rows.is_empty() {
            return Err(DashboardError::EmptyTable { path: origin.to_path_buf() });
        }

        let sorted = rows.windows(2).all(|w| w[0].age_label.upper <= w[1].age_label.upper);
        if !sorted {
            warn!("{}: rows not ordered by age, sorting", origin.display());
            rows.sort_by_key(|r| r.age_label.upper);
        }

        debug!("{}: loaded {} rows", origin.display(), rows.len());
        Ok(Self { headers, rows })
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> ReferenceTable {
        ReferenceTable::parse(text, Path::new("test.csv")).unwrap()
    }

    #[test]
    fn age_label_range_and_single() {
        let range = AgeLabel::parse("20 29").unwrap();
        assert_eq!((range.lower, range.upper, range.is_range), (20, 29, true));

        let single = AgeLabel::parse("90").unwrap();
        assert_eq!((single.lower, single.upper, single.is_range), (90, 90, false));

        let words = AgeLabel::parse("80 and over").unwrap();
        assert_eq!((words.lower, words.upper, words.is_range), (80, 80, false));

        assert_eq!(AgeLabel::parse("2-5").unwrap().upper, 5);
    }

    #[test]
    fn age_label_rejects_garbage() {
        assert!(AgeLabel::parse("Total").is_none());
        assert!(AgeLabel::parse("").is_none());
        assert!(AgeLabel::parse("30 20").is_none());
    }

    #[test]
    fn skips_title_and_reads_header() {
        let t = table("Table 9. Height in centimeters\nAge,n,Mean,SE\n20 29,100,176.4,0.3\n30 39,90,176.0,0.4\n");
        assert_eq!(t.headers, vec!["Age", "n", "Mean", "SE"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows[0].representative_value, 176.4);
        assert_eq!(t.rows[1].statistic(3), Some(0.4));
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let t = table(
            "title\nAge,n,Mean\n20 29,100,176.4\nTotal,5,170\n30 39,90\n40 49,x,n/a\n45 49,1,999,junk\n50 59,80,175.1\n",
        );
        let labels: Vec<&str> = t.rows.iter().map(|r| r.age_label.text.as_str()).collect();
        assert_eq!(labels, vec!["20 29", "50 59"]);
    }

    #[test]
    fn row_with_extra_fields_cannot_win_first_match() {
        let t = table("t\nAge,n,Mean\n20 29,1,170\n30 39,1,999,junk,junk\n");
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows[0].representative_value, 170.0);
        assert_eq!(crate::resolver::first_match(&t, 35), None);
    }

    #[test]
    fn rows_end_up_ordered_by_upper_bound() {
        let t = table("title\nAge,n,Mean\n30 39,1,2\n20 29,1,1\n90,1,3\n");
        let uppers: Vec<u32> = t.rows.iter().map(|r| r.age_label.upper).collect();
        assert_eq!(uppers, vec![29, 39, 90]);
    }

    #[test]
    fn table_without_rows_is_an_error() {
        let err = ReferenceTable::parse("title\nAge,n,Mean\n", Path::new("e.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyTable { .. }));
    }
}
