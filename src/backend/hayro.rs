use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hayro::hayro_interpret::InterpreterSettings;
use hayro::hayro_interpret::util::PageExt;
use hayro::hayro_syntax::Pdf;
use hayro::vello_cpu::color::palette::css::WHITE;
use hayro::{RenderSettings, render};

use crate::error::{AppError, AppResult};

use super::traits::{PageFrame, RenderBackend};

/// A PDF opened through hayro.
pub struct HayroDoc {
    path: PathBuf,
    doc_id: u64,
    pdf: Pdf,
}

impl RenderBackend for HayroDoc {
    fn path(&self) -> &Path {
        HayroDoc::path(self)
    }

    fn doc_id(&self) -> u64 {
        HayroDoc::doc_id(self)
    }

    fn page_count(&self) -> usize {
        HayroDoc::page_count(self)
    }

    fn page_size(&self, index: usize) -> AppResult<(f32, f32)> {
        HayroDoc::page_size(self, index)
    }

    fn render_page(&self, index: usize, scale: f32) -> AppResult<PageFrame> {
        HayroDoc::render_page(self, index, scale)
    }
}

impl HayroDoc {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = Self::read_source_bytes(path)?;
        Self::open_with_bytes(path, bytes)
    }

    pub fn read_source_bytes(path: impl AsRef<Path>) -> AppResult<Arc<Vec<u8>>> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(AppError::invalid_argument("source path must not be empty"));
        }
        if !path.exists() {
            return Err(AppError::io_with_context(
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"),
                format!("source file not found: {}", path.display()),
            ));
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(
                "source path must be a regular file",
            ));
        }

        let bytes = Arc::new(std::fs::read(path)?);
        if !bytes.as_slice().starts_with(b"%PDF-") {
            return Err(AppError::invalid_argument(
                "source file has no PDF header",
            ));
        }

        Ok(bytes)
    }

    pub fn open_with_bytes(path: impl AsRef<Path>, bytes: Arc<Vec<u8>>) -> AppResult<Self> {
        let path = path.as_ref();
        if !bytes.as_slice().starts_with(b"%PDF-") {
            return Err(AppError::invalid_argument(
                "source file has no PDF header",
            ));
        }
        let doc_id = derive_doc_id(path, bytes.len());
        let pdf = Pdf::new(bytes)
            .map_err(|_| AppError::invalid_argument("hayro could not parse the document"))?;

        Ok(Self {
            path: path.to_path_buf(),
            doc_id,
            pdf,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn doc_id(&self) -> u64 {
        self.doc_id
    }

    pub fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    pub fn page_size(&self, index: usize) -> AppResult<(f32, f32)> {
        let page = self
            .pdf
            .pages()
            .get(index)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        Ok(page.render_dimensions())
    }

    pub fn render_page(&self, index: usize, scale: f32) -> AppResult<PageFrame> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::invalid_argument(
                "render scale must be a positive finite value",
            ));
        }

        let page = self
            .pdf
            .pages()
            .get(index)
            .ok_or(AppError::invalid_argument("page index is out of range"))?;

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            bg_color: WHITE,
            ..Default::default()
        };
        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(page, &interpreter_settings, &render_settings);

        Ok(PageFrame {
            width: pixmap.width() as u32,
            height: pixmap.height() as u32,
            pixels: pixmap.data_as_u8_slice().to_vec().into(),
        })
    }
}

fn derive_doc_id(path: &Path, byte_len: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    byte_len.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::AppError;

    use super::{HayroDoc, tiny_pdf};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!("ppane_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn open_rejects_directory_path() {
        let dir = unique_temp_path("dir");
        fs::create_dir_all(&dir).expect("test directory should be created");

        let result = HayroDoc::open(&dir);
        assert!(matches!(
            result,
            Err(AppError::InvalidArgument(message))
                if message == "source path must be a regular file"
        ));

        fs::remove_dir_all(&dir).expect("test directory should be removed");
    }

    #[test]
    fn open_rejects_non_pdf_bytes() {
        let file = unique_temp_path("plain.txt");
        fs::write(&file, b"just text, no header").expect("test file should be created");

        assert!(matches!(
            HayroDoc::open(&file),
            Err(AppError::InvalidArgument(message))
                if message == "source file has no PDF header"
        ));

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn open_reports_page_count_and_doc_id() {
        let file = unique_temp_path("two_pages.pdf");
        fs::write(&file, tiny_pdf(2)).expect("test file should be created");

        let doc = HayroDoc::open(&file).expect("valid pdf should open");
        assert_eq!(doc.path(), file.as_path());
        assert_eq!(doc.page_count(), 2);
        assert_ne!(doc.doc_id(), 0);

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn page_size_reads_media_box() {
        let file = unique_temp_path("sized.pdf");
        fs::write(&file, tiny_pdf(1)).expect("test file should be created");
        let doc = HayroDoc::open(&file).expect("pdf should open");

        let (width, height) = doc.page_size(0).expect("page size should be available");
        assert!((width - 200.0).abs() < f32::EPSILON);
        assert!((height - 400.0).abs() < f32::EPSILON);

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn render_page_produces_rgba_frame() {
        let file = unique_temp_path("render.pdf");
        fs::write(&file, tiny_pdf(1)).expect("test file should be created");
        let doc = HayroDoc::open(&file).expect("pdf should open");

        let frame = doc.render_page(0, 1.0).expect("render should succeed");
        assert!(frame.width > 0);
        assert!(frame.height > 0);
        assert_eq!(
            frame.byte_len(),
            frame.width as usize * frame.height as usize * 4
        );

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn render_page_rejects_out_of_range_index() {
        let file = unique_temp_path("range.pdf");
        fs::write(&file, tiny_pdf(1)).expect("test file should be created");
        let doc = HayroDoc::open(&file).expect("pdf should open");

        let err = doc.render_page(5, 1.0).expect_err("index should be invalid");
        assert!(matches!(
            err,
            AppError::InvalidArgument(message) if message == "page index is out of range"
        ));

        fs::remove_file(&file).expect("test file should be removed");
    }

    #[test]
    fn render_page_rejects_non_positive_scale() {
        let file = unique_temp_path("scale.pdf");
        fs::write(&file, tiny_pdf(1)).expect("test file should be created");
        let doc = HayroDoc::open(&file).expect("pdf should open");

        assert!(doc.render_page(0, 0.0).is_err());
        assert!(doc.render_page(0, f32::NAN).is_err());

        fs::remove_file(&file).expect("test file should be removed");
    }

}

/// Builds a minimal valid PDF with `page_count` plain 200x400pt pages.
#[cfg(test)]
pub(crate) fn tiny_pdf(page_count: usize) -> Vec<u8> {
    let page_count = page_count.max(1);
    let mut objects: Vec<String> = Vec::new();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + i * 2))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!(
        "<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"
    ));
    for i in 0..page_count {
        let content_id = 4 + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 400] /Resources << >> /Contents {content_id} 0 R >>"
        ));
        let stream = "0 0 m";
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = vec![0_usize];
    for (index, object) in objects.iter().enumerate() {
        offsets.push(bytes.len());
        bytes.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", index + 1).as_bytes());
    }

    let xref_start = bytes.len();
    bytes.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    bytes.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        bytes.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    bytes.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    bytes
}
