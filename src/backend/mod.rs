use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AppResult;

mod hayro;
mod traits;

pub use hayro::HayroDoc;
pub use traits::{PageFrame, RenderBackend};

#[cfg(test)]
pub(crate) use hayro::tiny_pdf;

pub fn open_default_backend(path: impl AsRef<Path>) -> AppResult<Box<dyn RenderBackend>> {
    HayroDoc::open(path).map(|doc| Box::new(doc) as Box<dyn RenderBackend>)
}

pub fn open_default_backend_with_bytes(
    path: impl AsRef<Path>,
    bytes: Arc<Vec<u8>>,
) -> AppResult<Box<dyn RenderBackend>> {
    HayroDoc::open_with_bytes(path, bytes).map(|doc| Box::new(doc) as Box<dyn RenderBackend>)
}

/// Document metadata captured once the load completes.
///
/// The viewer keeps this instead of the backend itself; render workers reopen
/// the document from the shared bytes on their own threads.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    pub path: PathBuf,
    pub doc_id: u64,
    pub page_count: usize,
    /// Page sizes in points, indexed by 0-based page index.
    pub page_sizes: Vec<(f32, f32)>,
    pub bytes: Arc<Vec<u8>>,
}

pub fn load_document(path: impl AsRef<Path>) -> AppResult<DocumentHandle> {
    let path = path.as_ref();
    let bytes = HayroDoc::read_source_bytes(path)?;
    let doc = HayroDoc::open_with_bytes(path, Arc::clone(&bytes))?;

    let page_count = doc.page_count();
    let mut page_sizes = Vec::with_capacity(page_count);
    for index in 0..page_count {
        page_sizes.push(doc.page_size(index)?);
    }

    Ok(DocumentHandle {
        path: path.to_path_buf(),
        doc_id: doc.doc_id(),
        page_count,
        page_sizes,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_document, tiny_pdf};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("ppane_doc_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_document_captures_count_and_sizes() {
        let file = unique_temp_path("handle.pdf");
        fs::write(&file, tiny_pdf(3)).expect("test file should be created");

        let doc = load_document(&file).expect("document should load");
        assert_eq!(doc.page_count, 3);
        assert_eq!(doc.page_sizes.len(), 3);
        assert!(doc.page_sizes.iter().all(|&(w, h)| w > 0.0 && h > 0.0));
        assert_eq!(doc.path, file);

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn load_document_fails_for_missing_file() {
        let missing = unique_temp_path("missing.pdf");
        assert!(load_document(&missing).is_err());
    }
}
