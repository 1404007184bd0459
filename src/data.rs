use log::debug;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{DashboardError, Result},
    issues::IssueSummary,
    reference::ReferenceTable,
    selection::{Country, Gender, Metric, Source, TEMPERATURE_FILE, issues_file_name, reference_file_name},
    weather::TemperatureSeries,
};

/// Ładowanie plików CSV z katalogu danych. Nazwy plików powstają wyłącznie
/// z zamkniętych list wyboru. Opcjonalnie pamięta tabele referencyjne.
pub struct DataStore {
    base: PathBuf,
    cache: Option<BTreeMap<(Country, Gender, Metric), ReferenceTable>>,
}

impl DataStore {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self { base: base.as_ref().to_path_buf(), cache: None }
    }

    /// Włącza pamięć podręczną tabel referencyjnych.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(BTreeMap::new());
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Czyta plik jako tekst; bajty spoza UTF-8 są zastępowane.
    fn read_text(&self, filename: &str) -> Result<(PathBuf, String)> {
        let path = self.base.join(filename);
        debug!("reading {}", path.display());
        let bytes = fs::read(&path)
            .map_err(|source| DashboardError::DataUnavailable { path: path.clone(), source })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok((path, text))
    }

    pub fn load_reference(&mut self, country: Country, gender: Gender, metric: Metric) -> Result<ReferenceTable> {
        let key = (country, gender, metric);
        if let Some(table) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            return Ok(table.clone());
        }
        let (path, text) = self.read_text(&reference_file_name(country, gender, metric))?;
        let table = ReferenceTable::parse(&text, &path)?;
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(key, table.clone());
        }
        Ok(table)
    }

    pub fn load_issues(&self, source: Source, country: Country) -> Result<IssueSummary> {
        let (path, text) = self.read_text(&issues_file_name(source, country))?;
        IssueSummary::parse(&text, &path)
    }

    pub fn load_temperature(&self, country: Country) -> Result<TemperatureSeries> {
        let (path, text) = self.read_text(TEMPERATURE_FILE)?;
        TemperatureSeries::parse(&text, country, &path)
    }

    pub fn cached_tables(&self) -> usize {
        self.cache.as_ref().map_or(0, BTreeMap::len)
    }
}
