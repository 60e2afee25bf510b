use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

const LEDGER_FILE: &str = "winner_count.txt";

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("ledger contents {0:?} are not a count")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The one piece of state shared by every request: a persisted count of
/// winning events. The file holds the decimal count and nothing else; a
/// missing file reads as zero.
///
/// `increment` holds a single process-wide mutex across its read-add-write,
/// which makes increments a linear history; a bare read-then-write would lose
/// updates under concurrent winners. The new value is written to a temp file
/// and renamed into place, so a concurrent `read` observes either the old or
/// the new count, never a torn value.
#[derive(Clone, Debug)]
pub struct WinnerLedger {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    guard: Mutex<()>,
}

impl WinnerLedger {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: data_dir.join(LEDGER_FILE),
                guard: Mutex::new(()),
            }),
        }
    }

    pub async fn read(&self) -> Result<u64, LedgerError> {
        read_count(&self.inner.path).await
    }

    pub async fn increment(&self) -> Result<u64, LedgerError> {
        let _guard = self.inner.guard.lock().await;
        let count = read_count(&self.inner.path).await? + 1;

        if let Some(parent) = self.inner.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.inner.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, count.to_string()).await?;
        fs::rename(&tmp, &self.inner.path).await?;

        Ok(count)
    }
}

async fn read_count(path: &Path) -> Result<u64, LedgerError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(error) => return Err(error.into()),
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| LedgerError::Malformed(raw.to_string()))
}
