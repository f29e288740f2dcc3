//! Flat-file persistence for the assembled calendar.
//!
//! The calendar is written as a whole-file replacement on every save, so
//! concurrent readers always see either the previous snapshot or the new
//! one, never a partial write. At-most-one writer per refresh cycle is the
//! caller's responsibility.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{IpoError, IpoRecord};

#[derive(Serialize, Deserialize)]
struct CalendarFile {
    ipos: Vec<IpoRecord>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

// Early seed files were a bare array of records; both forms still load.
#[derive(Deserialize)]
#[serde(untagged)]
enum CalendarFileCompat {
    Versioned(CalendarFile),
    Legacy(Vec<IpoRecord>),
}

/// A previously persisted calendar plus its save timestamp.
#[derive(Debug, Clone, Default)]
pub struct StoredCalendar {
    /// The records as last assembled.
    pub ipos: Vec<IpoRecord>,
    /// When the calendar was last saved; `None` for legacy files.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Owns the JSON file holding the calendar between refresh cycles.
#[derive(Debug, Clone)]
pub struct CalendarStore {
    path: PathBuf,
}

impl CalendarStore {
    /// A store backed by the given file path. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previously persisted calendar.
    ///
    /// A missing file is an empty calendar, not an error: the first refresh
    /// cycle starts from nothing.
    ///
    /// # Errors
    ///
    /// Returns `IpoError::Io` on read failures other than a missing file,
    /// and `IpoError::Json` when the file contents don't parse as either the
    /// versioned or the legacy format.
    pub fn load(&self) -> Result<StoredCalendar, IpoError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredCalendar::default());
            }
            Err(e) => return Err(IpoError::Io(e)),
        };

        match serde_json::from_str::<CalendarFileCompat>(&text)? {
            CalendarFileCompat::Versioned(file) => Ok(StoredCalendar {
                ipos: file.ipos,
                last_updated: file.last_updated,
            }),
            CalendarFileCompat::Legacy(ipos) => Ok(StoredCalendar {
                ipos,
                last_updated: None,
            }),
        }
    }

    /// Persist a complete calendar, stamping the save time.
    ///
    /// The file is replaced atomically: the JSON is written to a sibling
    /// temp file which is then renamed over the target.
    ///
    /// # Errors
    ///
    /// Returns `IpoError::Io` on write or rename failures.
    pub fn save(&self, records: &[IpoRecord]) -> Result<(), IpoError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = CalendarFile {
            ipos: records.to_vec(),
            last_updated: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "saved calendar");
        Ok(())
    }
}
