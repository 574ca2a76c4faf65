//! Dataset loading.
//!
//! The dataset is parsed once at startup and shared read-only afterwards.
//! Structural problems (missing names, wrong container types) fail the load;
//! everything after that point treats the tree as well-formed.

use crate::slug::slugify;
use crate::types::{Domain, Industry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SAMPLE_DATASET: &str = include_str!("../data/sample_kpis.json");

/// Errors raised while loading a dataset document.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not a valid KPI document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The whole knowledge base: an ordered sequence of domains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    domains: Vec<Domain>,
}

/// Entity counts, logged after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub domains: usize,
    pub industries: usize,
    pub kpis: usize,
    pub usecases: usize,
}

impl Dataset {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self { domains }
    }

    pub fn from_json_str(src: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(src)?;
        let stats = dataset.stats();
        tracing::debug!(
            domains = stats.domains,
            industries = stats.industries,
            kpis = stats.kpis,
            usecases = stats.usecases,
            "dataset parsed"
        );
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = src.len(), "dataset read");
        Self::from_json_str(&src)
    }

    /// The small dataset compiled into the binary, used when no file is
    /// configured.
    pub fn sample() -> Self {
        Self::from_json_str(SAMPLE_DATASET).expect("embedded sample dataset must be valid")
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Every industry paired with its owning domain, in document order.
    pub fn industries(&self) -> impl Iterator<Item = (&Domain, &Industry)> {
        self.domains
            .iter()
            .flat_map(|d| d.industries.iter().map(move |i| (d, i)))
    }

    /// First industry whose slug equals `slug`.
    pub fn industry_by_slug(&self, slug: &str) -> Option<&Industry> {
        self.industries()
            .map(|(_, industry)| industry)
            .find(|industry| slugify(&industry.name) == slug)
    }

    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            domains: self.domains.len(),
            ..Default::default()
        };
        for (_, industry) in self.industries() {
            stats.industries += 1;
            for sub in industry.subdepartments() {
                stats.kpis += sub.kpicollection.len();
                stats.usecases += sub.usecases.len();
            }
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn sample_loads() {
        let ds = Dataset::sample();
        let stats = ds.stats();
        assert!(stats.domains > 0);
        assert!(stats.industries > 0);
        assert!(stats.kpis > 0);
        assert!(stats.usecases > 0);
    }

    #[test]
    fn industry_by_slug_finds_sample_industry() {
        let ds = Dataset::sample();
        let industry = ds.industry_by_slug("banking").expect("sample has Banking");
        assert_eq!(industry.name, "Banking");
        assert!(ds.industry_by_slug("no-such-industry").is_none());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"domain": "Finance", "industries": [{{"industry": "Insurance"}}]}}]"#
        )
        .unwrap();
        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.domains().len(), 1);
        assert_eq!(ds.domains()[0].industries[0].name, "Insurance");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Dataset::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn structural_error_is_parse_error() {
        // `industries` must be an array
        let err = Dataset::from_json_str(r#"[{"domain": "X", "industries": 5}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
