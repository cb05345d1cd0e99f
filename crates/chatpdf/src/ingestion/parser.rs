//! PDF text extraction

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{DocumentSet, UploadedFile};

/// Turns an uploaded document set into one block of text
pub trait TextExtractor: Send + Sync {
    /// Concatenate the text of every file, in upload order.
    ///
    /// Fails on the first file that cannot be parsed; nothing from the
    /// batch is returned in that case.
    fn extract(&self, documents: &DocumentSet) -> Result<String>;
}

/// Extractor backed by pdf-extract with a lopdf fallback
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    /// Time allowed for pdf-extract per file
    timeout: Duration,
}

impl PdfExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Extract the text of a single PDF, pages in order
    pub fn extract_file(&self, file: &UploadedFile) -> Result<String> {
        if !file.data.starts_with(b"%PDF") {
            return Err(Error::document_parse(&file.filename, "missing %PDF header"));
        }

        let text = self.extract_with_timeout(file)?;
        Ok(text.replace('\0', ""))
    }

    /// Run pdf-extract on a helper thread; some fonts make it spin for minutes
    fn extract_with_timeout(&self, file: &UploadedFile) -> Result<String> {
        let data = file.data.clone();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data);
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(text)) => {
                let _ = handle.join();
                Ok(text)
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed on {}: {}, trying fallback", file.filename, e);
                extract_text_fallback(file)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::error!(
                    "pdf-extract timed out after {:?} on {}, trying fallback",
                    self.timeout,
                    file.filename
                );
                extract_text_fallback(file)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("pdf-extract thread crashed on {}", file.filename);
                extract_text_fallback(file)
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, documents: &DocumentSet) -> Result<String> {
        let mut text = String::new();

        for file in documents.files() {
            tracing::info!("Extracting text from {} ({} bytes)", file.filename, file.data.len());
            let file_text = self.extract_file(file)?;
            tracing::debug!("{}: {} chars extracted", file.filename, file_text.chars().count());
            text.push_str(&file_text);
        }

        Ok(text)
    }
}

/// Page-by-page extraction straight from the content streams with lopdf
fn extract_text_fallback(file: &UploadedFile) -> Result<String> {
    let doc = lopdf::Document::load_mem(&file.data)
        .map_err(|e| Error::document_parse(&file.filename, format!("Failed to load PDF: {}", e)))?;

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration is in page order
    for (page_num, page_id) in doc.get_pages() {
        match doc.get_page_content(page_id) {
            Ok(content) => text.push_str(&extract_text_from_content(&content)),
            Err(e) => {
                tracing::debug!("Could not get content for page {} of {}: {}", page_num, file.filename, e);
            }
        }
    }

    Ok(text)
}

/// Collect the string operands of `Tj`/`TJ` operators between `BT` and `ET`
fn extract_text_from_content(content: &[u8]) -> String {
    let content = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;

    for line in content.lines() {
        let line = line.trim();

        match line {
            "BT" => {
                in_text_block = true;
                continue;
            }
            "ET" => {
                in_text_block = false;
                text.push('\n');
                continue;
            }
            _ => {}
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            let mut depth = 0usize;
            for c in line.chars() {
                match c {
                    '(' => {
                        if depth > 0 {
                            text.push(c);
                        }
                        depth += 1;
                    }
                    ')' => {
                        depth = depth.saturating_sub(1);
                        if depth > 0 {
                            text.push(c);
                        }
                    }
                    _ if depth > 0 => text.push(c),
                    _ => {}
                }
            }
            text.push(' ');
        }
    }

    text
}
