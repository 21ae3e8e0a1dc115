use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use crate::{
    extract::{FeatureRow, FeatureTable, LABEL_COLUMN, parse_cell},
    types::AudioFeatures,
};

#[derive(Debug)]
pub enum TableError {
    IoError(Error),
    CsvError(csv::Error),
    CriticalError(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::IoError(e) => write!(f, "io error: {}", e),
            TableError::CsvError(e) => write!(f, "csv error: {}", e),
            TableError::CriticalError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TableError {}

impl From<Error> for TableError {
    fn from(err: Error) -> Self {
        TableError::IoError(err)
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::CsvError(err)
    }
}

/// Caches a playlist's feature table as CSV at a fixed path.
///
/// The file's existence is the cache key: when it exists, the table is read
/// back instead of being extracted again.
pub struct FeatureTableManager {
    path: PathBuf,
}

impl FeatureTableManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub async fn load(&self) -> Result<FeatureTable, TableError> {
        let content = async_fs::read_to_string(&self.path).await?;
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let Some(label_idx) = headers.iter().position(|h| h == LABEL_COLUMN) else {
            return Err(TableError::CriticalError(format!(
                "{} has no {} column",
                self.path.display(),
                LABEL_COLUMN
            )));
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut features = AudioFeatures::new();
            let mut label = None;

            for (idx, (column, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if idx == label_idx {
                    label = (!cell.is_empty()).then(|| cell.to_string());
                } else {
                    features.insert(column.to_string(), parse_cell(column, cell));
                }
            }

            rows.push(FeatureRow { features, label });
        }

        Ok(FeatureTable::from_rows(rows))
    }

    pub async fn persist(&self, table: &FeatureTable) -> Result<(), TableError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(table.columns())?;
        for record in table.records() {
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TableError::IoError(e.into_error()))?;
        async_fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
