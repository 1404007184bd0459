use log::warn;
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

use crate::error::{DashboardError, Result};

pub const CLUSTER_COLUMN: &str = "Cluster ID";
pub const ISSUE_COLUMN: &str = "Issue";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub id: i64,
    pub count: usize,
    /// Pierwsze zgłoszenie klastra w kolejności pliku
    pub first_issue: String,
}

/// Zgłoszenia pogrupowane wg `Cluster ID`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IssueSummary {
    /// Rosnąco wg id
    pub clusters: Vec<ClusterSummary>,
}

impl IssueSummary {
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut by_id: BTreeMap<i64, ClusterSummary> = BTreeMap::new();
        for (id, issue) in rows {
            by_id
                .entry(id)
                .and_modify(|c| c.count += 1)
                .or_insert_with(|| ClusterSummary { id, count: 1, first_issue: issue.into() });
        }
        Self { clusters: by_id.into_values().collect() }
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| DashboardError::Csv { path: origin.to_path_buf(), source })?
            .clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DashboardError::MissingColumn { path: origin.to_path_buf(), column: name })
        };
        let cluster_idx = column(CLUSTER_COLUMN)?;
        let issue_idx = column(ISSUE_COLUMN)?;

        let mut skipped = 0usize;
        let mut rows = Vec::new();
        for record in reader.records() {
            let parsed = record.ok().filter(|r| r.len() <= headers.len()).and_then(|r| {
                let id = r.get(cluster_idx)?.trim().parse::<i64>().ok()?;
                let issue = r.get(issue_idx)?.trim().to_string();
                Some((id, issue))
            });
            match parsed {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{}: skipped {} malformed rows", origin.display(), skipped);
        }
        Ok(Self::from_rows(rows))
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// (id, liczba) do wykresu słupkowego
    pub fn counts(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.clusters.iter().map(|c| (c.id, c.count))
    }

    pub fn text(&self) -> String {
        self.clusters
            .iter()
            .map(|c| format!("Issue {} : {}", c.id, c.first_issue))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
