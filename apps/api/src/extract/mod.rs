//! Document Text Extractor — turns uploaded files into plain text.
//!
//! Supports plain text, PDF (`pdf-extract`) and Word documents (`docx-rs`).
//! Each file extracts independently: a corrupt PDF in position 2 never
//! blocks files 1 and 3, and each file ends the batch as `Ready` or `Error`
//! on its own.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Upper bound on files per synthesis request.
pub const MAX_FILES: usize = 10;

/// File kinds the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    PlainText,
    Pdf,
    WordDoc,
}

/// Per-file extraction lifecycle. `Extracting` is the initial state a
/// client sees while a batch is in flight; every file finishes as `Ready`
/// or `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    Extracting,
    Ready,
    Error,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word document extraction failed: {0}")]
    Docx(String),
}

/// A file as received from the multipart boundary, before extraction.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// One file's outcome. `extracted_text` is empty when `status` is `Error`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    pub name: String,
    pub status: DocStatus,
    #[serde(skip_serializing)]
    pub extracted_text: String,
    pub char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    fn ready(name: String, text: String) -> Self {
        let char_count = text.chars().count();
        DocumentResult {
            name,
            status: DocStatus::Ready,
            extracted_text: text,
            char_count,
            error: None,
        }
    }

    fn failed(name: String, error: String) -> Self {
        DocumentResult {
            name,
            status: DocStatus::Error,
            extracted_text: String::new(),
            char_count: 0,
            error: Some(error),
        }
    }
}

/// Policy knobs threaded in from config rather than read from ambient state.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionPolicy {
    /// Fall back to lossy UTF-8 of the raw bytes when structured .docx
    /// extraction fails. Best-effort output, may be garbage.
    pub docx_raw_fallback: bool,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Classifies a file. PDFs are detected by MIME type or `%PDF` magic bytes,
/// never by extension alone (renamed files lie; the header doesn't).
pub fn detect_kind(name: &str, content_type: Option<&str>, data: &[u8]) -> Option<DocKind> {
    let ext = name.rsplit('.').next().map(|e| e.to_ascii_lowercase());

    if content_type == Some("application/pdf") || data.starts_with(b"%PDF") {
        return Some(DocKind::Pdf);
    }
    if content_type == Some(DOCX_MIME) || ext.as_deref() == Some("docx") {
        return Some(DocKind::WordDoc);
    }
    if content_type.is_some_and(|ct| ct.starts_with("text/plain")) || ext.as_deref() == Some("txt")
    {
        return Some(DocKind::PlainText);
    }
    None
}

/// Extracts text from one file's bytes. Synchronous and CPU-bound; callers
/// run it inside `spawn_blocking`.
pub fn extract_bytes(
    name: &str,
    content_type: Option<&str>,
    data: &[u8],
    policy: ExtractionPolicy,
) -> Result<String, ExtractionError> {
    let kind = detect_kind(name, content_type, data)
        .ok_or_else(|| ExtractionError::Unsupported(name.to_string()))?;

    match kind {
        DocKind::PlainText => Ok(String::from_utf8_lossy(data).into_owned()),
        DocKind::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractionError::Pdf(e.to_string())),
        DocKind::WordDoc => match extract_docx(data) {
            Ok(text) => Ok(text),
            Err(e) if policy.docx_raw_fallback => {
                warn!("docx extraction failed for '{name}', falling back to raw text: {e}");
                Ok(String::from_utf8_lossy(data).into_owned())
            }
            Err(e) => Err(e),
        },
    }
}

/// Walks the .docx paragraph tree and joins run text with newlines.
fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                RunChild::Text(t) => Some(t.text.clone()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");

            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Extracts a batch of files concurrently, one `spawn_blocking` task per
/// file. Results come back in input order; a failed file is reported as
/// `Error` and never aborts its neighbours.
pub async fn extract_all(files: Vec<PendingFile>, policy: ExtractionPolicy) -> Vec<DocumentResult> {
    let handles: Vec<_> = files
        .into_iter()
        .map(|file| {
            tokio::task::spawn_blocking(move || {
                let outcome =
                    extract_bytes(&file.name, file.content_type.as_deref(), &file.bytes, policy);
                match outcome {
                    Ok(text) => DocumentResult::ready(file.name, text),
                    Err(e) => DocumentResult::failed(file.name, e.to_string()),
                }
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!("extraction task panicked: {e}");
                results.push(DocumentResult::failed(
                    "(unknown)".to_string(),
                    format!("extraction task failed: {e}"),
                ));
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: ExtractionPolicy = ExtractionPolicy {
        docx_raw_fallback: true,
    };

    const STRICT: ExtractionPolicy = ExtractionPolicy {
        docx_raw_fallback: false,
    };

    #[test]
    fn test_detect_txt_by_extension() {
        assert_eq!(
            detect_kind("notes.txt", None, b"plain words"),
            Some(DocKind::PlainText)
        );
    }

    #[test]
    fn test_detect_pdf_by_magic_bytes_despite_txt_extension() {
        assert_eq!(
            detect_kind("renamed.txt", None, b"%PDF-1.7 rest"),
            Some(DocKind::Pdf)
        );
    }

    #[test]
    fn test_detect_pdf_by_mime() {
        assert_eq!(
            detect_kind("report", Some("application/pdf"), b"not-magic"),
            Some(DocKind::Pdf)
        );
    }

    #[test]
    fn test_detect_docx_by_extension() {
        assert_eq!(
            detect_kind("plan.docx", None, b"PK\x03\x04zip"),
            Some(DocKind::WordDoc)
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        assert_eq!(detect_kind("photo.png", Some("image/png"), &[0x89]), None);
        let err = extract_bytes("photo.png", Some("image/png"), &[0x89], POLICY).unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported(_)));
    }

    #[test]
    fn test_plain_text_extraction_is_passthrough() {
        let text = extract_bytes("notes.txt", Some("text/plain"), b"session notes", POLICY)
            .expect("txt extraction should succeed");
        assert_eq!(text, "session notes");
    }

    #[test]
    fn test_corrupt_pdf_fails_with_pdf_error() {
        let err = extract_bytes("broken.pdf", None, b"%PDF-1.4 garbage", POLICY).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_docx_fallback_reads_raw_bytes() {
        // Not a valid zip, so structured extraction fails and the lenient
        // policy degrades to raw text.
        let text = extract_bytes("notes.docx", None, b"not a real docx", POLICY)
            .expect("fallback should produce text");
        assert_eq!(text, "not a real docx");
    }

    #[test]
    fn test_docx_strict_policy_surfaces_error() {
        let err = extract_bytes("notes.docx", None, b"not a real docx", STRICT).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[tokio::test]
    async fn test_batch_extraction_is_independent_per_file() {
        // File 2 is a corrupt PDF; files 1 and 3 are valid text.
        let files = vec![
            PendingFile {
                name: "one.txt".into(),
                content_type: Some("text/plain".into()),
                bytes: Bytes::from_static(b"first file"),
            },
            PendingFile {
                name: "two.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: Bytes::from_static(b"%PDF-1.4 definitely corrupt"),
            },
            PendingFile {
                name: "three.txt".into(),
                content_type: Some("text/plain".into()),
                bytes: Bytes::from_static(b"third file"),
            },
        ];

        let results = extract_all(files, POLICY).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, DocStatus::Ready);
        assert_eq!(results[0].extracted_text, "first file");
        assert_eq!(results[1].status, DocStatus::Error);
        assert!(results[1].extracted_text.is_empty());
        assert!(results[1].error.is_some());
        assert_eq!(results[2].status, DocStatus::Ready);
        assert_eq!(results[2].extracted_text, "third file");
    }
}
