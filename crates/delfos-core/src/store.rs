use crate::store::error::StoreError;
use chrono::Utc;
use delfos_model::session::{Session, SessionRecord, Submission};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

pub mod error;

/// One append-only plain-text record per `(user_email, session_id)` pair,
/// stored under a single data directory.
///
/// Record layout: the participant email and the session id as header lines,
/// then one line-pair per submission (comma-joined question ids, comma-joined
/// upper-cased answers) in append order.
///
/// Operations on the same key are serialized through a per-key async lock;
/// operations on different keys never contend. Every write goes to a sibling
/// temp file first and is renamed over the record, so a storage fault cannot
/// corrupt lines that were already persisted.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    data_dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionStore {
    /// Opens the store, creating the data directory if needed.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        Ok(Self {
            inner: Arc::new(Inner {
                data_dir,
                locks: Mutex::new(HashMap::new()),
            }),
        })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    pub async fn create(&self, user_email: &str, session_id: &str) -> Result<Session, StoreError> {
        let name = record_name(user_email, session_id)?;
        let _guard = self.lock_key(&name).await;
        let path = self.inner.data_dir.join(&name);
        if fs::try_exists(&path).await? {
            return Err(StoreError::AlreadyExists {
                user_email: user_email.to_string(),
                session_id: session_id.to_string(),
            });
        }
        let header = format!("{user_email}\n{session_id}\n");
        write_atomic(&path, header.as_bytes()).await?;
        tracing::debug!(record = name, "created session record");
        Ok(Session {
            user_email: user_email.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        })
    }

    pub async fn append(
        &self,
        user_email: &str,
        session_id: &str,
        submission: &Submission,
    ) -> Result<(), StoreError> {
        let name = record_name(user_email, session_id)?;
        let _guard = self.lock_key(&name).await;
        let path = self.inner.data_dir.join(&name);
        let mut record = match fs::read_to_string(&path).await {
            Ok(record) => record,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    user_email: user_email.to_string(),
                    session_id: session_id.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };

        record.push_str(&submission.question_ids.join(","));
        record.push('\n');
        let answers: Vec<String> = submission
            .answers
            .iter()
            .map(|answer| answer.to_uppercase())
            .collect();
        record.push_str(&answers.join(","));
        record.push('\n');

        write_atomic(&path, record.as_bytes()).await?;
        tracing::debug!(
            record = name,
            questions = submission.question_ids.len(),
            "appended submission"
        );
        Ok(())
    }

    /// Reads a record back into its parsed form.
    pub async fn read(
        &self,
        user_email: &str,
        session_id: &str,
    ) -> Result<SessionRecord, StoreError> {
        let name = record_name(user_email, session_id)?;
        let _guard = self.lock_key(&name).await;
        let path = self.inner.data_dir.join(&name);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    user_email: user_email.to_string(),
                    session_id: session_id.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };
        parse_record(&name, &raw)
    }

    /// Per-key serialization point. The map itself is only held long enough
    /// to clone out the key's lock.
    async fn lock_key(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.locks.lock().expect("session lock map poisoned");
            Arc::clone(
                locks
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}

/// Record file name for a session key. Key parts end up in a path and in the
/// record header, so path separators, parent references and newlines are
/// rejected here rather than escaped.
fn record_name(user_email: &str, session_id: &str) -> Result<String, StoreError> {
    for part in [user_email, session_id] {
        let forbidden =
            part.is_empty() || part == ".." || part.contains(['/', '\\', '\n', '\r', '\0']);
        if forbidden {
            return Err(StoreError::InvalidKey(part.to_string()));
        }
    }
    Ok(format!("{user_email}_{session_id}.txt"))
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

fn parse_record(name: &str, raw: &str) -> Result<SessionRecord, StoreError> {
    let mut lines = raw.lines();
    let (Some(user_email), Some(session_id)) = (lines.next(), lines.next()) else {
        return Err(StoreError::Corrupt(name.to_string()));
    };
    let mut submissions = Vec::new();
    loop {
        let Some(question_ids) = lines.next() else {
            break;
        };
        let Some(answers) = lines.next() else {
            // A submission is persisted as a whole line-pair or not at all.
            return Err(StoreError::Corrupt(name.to_string()));
        };
        submissions.push(Submission {
            question_ids: split_line(question_ids),
            answers: split_line(answers),
        });
    }
    Ok(SessionRecord {
        user_email: user_email.to_string(),
        session_id: session_id.to_string(),
        submissions,
    })
}

fn split_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(',').map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn submission(ids: &[&str], answers: &[&str]) -> Submission {
        Submission {
            question_ids: ids.iter().map(ToString::to_string).collect(),
            answers: answers.iter().map(ToString::to_string).collect(),
        }
    }

    async fn open_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[test(tokio::test)]
    async fn create_writes_the_two_header_lines() {
        let (dir, store) = open_store().await;
        let session = store.create("a@x.com", "s1").await.unwrap();
        assert_eq!(session.user_email, "a@x.com");
        let raw = std::fs::read_to_string(dir.path().join("a@x.com_s1.txt")).unwrap();
        assert_eq!(raw, "a@x.com\ns1\n");
    }

    #[test(tokio::test)]
    async fn create_rejects_an_existing_key() {
        let (_dir, store) = open_store().await;
        store.create("a@x.com", "s1").await.unwrap();
        let err = store.create("a@x.com", "s1").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        // A different session of the same participant is unaffected.
        store.create("a@x.com", "s2").await.unwrap();
    }

    #[test(tokio::test)]
    async fn append_requires_an_existing_record() {
        let (_dir, store) = open_store().await;
        let err = store
            .append("a@x.com", "s1", &submission(&["CRD0001"], &["a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test(tokio::test)]
    async fn append_accumulates_uppercased_line_pairs() {
        let (dir, store) = open_store().await;
        store.create("a@x.com", "s1").await.unwrap();
        store
            .append("a@x.com", "s1", &submission(&["CRD0001", "CRD0004"], &["a", "c"]))
            .await
            .unwrap();
        store
            .append("a@x.com", "s1", &submission(&["CRD0002"], &["b"]))
            .await
            .unwrap();
        let raw = std::fs::read_to_string(dir.path().join("a@x.com_s1.txt")).unwrap();
        assert_eq!(raw, "a@x.com\ns1\nCRD0001,CRD0004\nA,C\nCRD0002\nB\n");
    }

    #[test(tokio::test)]
    async fn submissions_round_trip() {
        let (_dir, store) = open_store().await;
        store.create("a@x.com", "s1").await.unwrap();
        store
            .append("a@x.com", "s1", &submission(&["CRD0003", "CRD0001"], &["b", "d"]))
            .await
            .unwrap();
        let record = store.read("a@x.com", "s1").await.unwrap();
        assert_eq!(record.user_email, "a@x.com");
        assert_eq!(record.session_id, "s1");
        assert_eq!(
            record.submissions,
            vec![submission(&["CRD0003", "CRD0001"], &["B", "D"])]
        );
    }

    #[test(tokio::test)]
    async fn keys_with_path_separators_are_rejected() {
        let (_dir, store) = open_store().await;
        for (email, session) in [
            ("../a@x.com", "s1"),
            ("a/b@x.com", "s1"),
            ("a@x.com", "s\n1"),
            ("", "s1"),
            ("a@x.com", ""),
        ] {
            let err = store.create(email, session).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "{email:?}/{session:?}");
        }
    }

    #[test(tokio::test)]
    async fn truncated_record_reads_as_corrupt() {
        let (dir, store) = open_store().await;
        store.create("a@x.com", "s1").await.unwrap();
        let path = dir.path().join("a@x.com_s1.txt");
        std::fs::write(&path, "a@x.com\ns1\nCRD0001,CRD0002\n").unwrap();
        let err = store.read("a@x.com", "s1").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test(tokio::test(flavor = "multi_thread"))]
    async fn racing_appends_to_one_key_never_interleave() {
        let (_dir, store) = open_store().await;
        store.create("a@x.com", "s1").await.unwrap();

        let mut tasks = Vec::new();
        for index in 0..16usize {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let ids = vec![format!("CRD{:04}", index + 1), format!("CRD{:04}", index + 17)];
                let answers = vec!["a".to_string(), "b".to_string()];
                store
                    .append("a@x.com", "s1", &Submission { question_ids: ids, answers })
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let record = store.read("a@x.com", "s1").await.unwrap();
        assert_eq!(record.submissions.len(), 16);
        // Arrival order across racing writers is unspecified, but every
        // line-pair must be intact.
        for sub in &record.submissions {
            assert_eq!(sub.question_ids.len(), 2);
            assert_eq!(sub.answers, vec!["A".to_string(), "B".to_string()]);
        }
    }

    #[test(tokio::test(flavor = "multi_thread"))]
    async fn different_keys_do_not_contend() {
        let (_dir, store) = open_store().await;
        let mut tasks = Vec::new();
        for index in 0..8usize {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let session = format!("s{index}");
                store.create("a@x.com", &session).await.unwrap();
                store
                    .append("a@x.com", &session, &submission(&["CRD0001"], &["a"]))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        for index in 0..8usize {
            let record = store.read("a@x.com", &format!("s{index}")).await.unwrap();
            assert_eq!(record.submissions.len(), 1);
        }
    }
}
