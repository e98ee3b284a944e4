//! Student data access layer
//!
//! A single collection of student documents. The collection is held in
//! memory and written through to a JSON document file on every mutation,
//! so the file always reflects the last successful write.

mod error;

pub use error::StoreError;

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use crate::logger;
use crate::model::{Student, StudentId, StudentInput};

/// Student collection
pub struct StudentStore {
    /// Collection file; `None` keeps documents in memory only
    path: Option<PathBuf>,
    docs: RwLock<Vec<Student>>,
}

impl StudentStore {
    /// Open (or create) the collection file at `path`.
    ///
    /// A missing file is an empty collection. An unreadable or corrupt file
    /// is an error; callers treat it as fatal at startup.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Connect {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let docs = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Connect { path, source }),
        };

        logger::log_info(&format!(
            "Opened collection {} ({} documents)",
            path.display(),
            docs.len()
        ));

        Ok(Self {
            path: Some(path),
            docs: RwLock::new(docs),
        })
    }

    /// Create an empty collection that is never written to disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            docs: RwLock::new(Vec::new()),
        }
    }

    /// All students in insertion order
    pub async fn list_all(&self) -> Vec<Student> {
        self.docs.read().await.clone()
    }

    pub async fn find_by_id(&self, id: StudentId) -> Option<Student> {
        self.docs.read().await.iter().find(|s| s.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Validate and insert a new student, returning its generated id
    pub async fn insert(&self, input: &StudentInput) -> Result<StudentId, StoreError> {
        let new = input.validate()?;
        let student = Student::new(StudentId::generate(), new);
        let id = student.id;

        let mut docs = self.docs.write().await;
        let mut next = docs.clone();
        next.push(student);
        self.persist(&next).await?;
        *docs = next;

        logger::log_debug(&format!("Inserted student {id}"));
        Ok(id)
    }

    /// Validate the supplied fields and merge them into an existing student
    pub async fn update_by_id(
        &self,
        id: StudentId,
        input: &StudentInput,
    ) -> Result<Student, StoreError> {
        let mut docs = self.docs.write().await;
        let index = docs
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let patch = input.validate_patch()?;
        if patch.is_empty() {
            return Ok(docs[index].clone());
        }

        let mut next = docs.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.persist(&next).await?;
        *docs = next;

        logger::log_debug(&format!("Updated student {id}"));
        Ok(updated)
    }

    /// Remove a student, returning the removed record
    pub async fn delete_by_id(&self, id: StudentId) -> Result<Student, StoreError> {
        let mut docs = self.docs.write().await;
        let index = docs
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut next = docs.clone();
        let removed = next.remove(index);
        self.persist(&next).await?;
        *docs = next;

        logger::log_debug(&format!("Deleted student {id}"));
        Ok(removed)
    }

    /// Check that the collection is still reachable
    pub async fn ping(&self) -> Result<(), StoreError> {
        let Some(dir) = self.path.as_deref().and_then(Path::parent) else {
            return Ok(());
        };
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        fs::metadata(dir).await?;
        Ok(())
    }

    /// Write the whole collection via a temporary file and rename
    async fn persist(&self, docs: &[Student]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(docs)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}
