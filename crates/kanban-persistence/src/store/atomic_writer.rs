use kanban_core::KanbanResult;
use std::path::Path;
use tokio::fs;

/// Writes a board file by writing a sibling temp file and renaming it over
/// the target, so readers never observe a half-written file.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        // Same directory keeps the rename on one filesystem
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let (_, temp_path) = temp_file.keep().map_err(|e| e.error)?;

        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// `None` when the file does not exist yet.
    pub async fn read_if_exists(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("boards.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"{\"boards\":[]}")
            .await
            .unwrap();

        let read = AtomicWriter::read_if_exists(&file_path).await.unwrap();
        assert_eq!(read.as_deref(), Some(&b"{\"boards\":[]}"[..]));
    }

    #[tokio::test]
    async fn test_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("boards.json");

        AtomicWriter::write_atomic(&file_path, b"[]").await.unwrap();
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_if_exists(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(read.is_none());
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("boards.json");
        AtomicWriter::write_atomic(&file_path, b"1").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
