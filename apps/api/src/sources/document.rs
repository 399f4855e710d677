//! Document Text Extractor: turns an uploaded PDF or DOCX into plain text.
//!
//! Best effort only: corrupt files, unsupported formats and empty payloads
//! all come back as an empty string. Nothing in here may fail the request.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOCX_BODY_PART: &str = "word/document.xml";

/// The two upload formats we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from the declared content type, falling back to
    /// the file extension when the content type is missing or generic.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let by_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or(ct).trim();
            match essence.to_ascii_lowercase().as_str() {
                PDF_MIME => Some(Self::Pdf),
                DOCX_MIME => Some(Self::Docx),
                _ => None,
            }
        });

        by_mime.or_else(|| {
            let name = file_name?.to_ascii_lowercase();
            if name.ends_with(".pdf") {
                Some(Self::Pdf)
            } else if name.ends_with(".docx") {
                Some(Self::Docx)
            } else {
                None
            }
        })
    }
}

#[derive(Debug, Error)]
enum DocxError {
    #[error("zip container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Extracts plain text from `bytes`. Paragraph breaks become `\n`.
/// `None` format (unknown upload type) yields empty text.
pub fn extract_text(bytes: &[u8], format: Option<DocumentFormat>) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    match format {
        Some(DocumentFormat::Pdf) => extract_pdf(bytes),
        Some(DocumentFormat::Docx) => match extract_docx(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("DOCX extraction failed, continuing with empty text: {e}");
                String::new()
            }
        },
        None => {
            debug!("Unsupported document format, skipping {} bytes", bytes.len());
            String::new()
        }
    }
}

fn extract_pdf(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs; treat that like any other parse error.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed, continuing with empty text: {e:?}");
            String::new()
        }
        Err(_) => {
            warn!("PDF parser panicked, continuing with empty text");
            String::new()
        }
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;
    paragraphs_from_document_xml(&xml)
}

/// Walks `word/document.xml`, collecting the text of each `w:p`.
/// Tabs and line breaks are only honoured inside runs (`w:r`), since the
/// same element names also describe tab stops in paragraph properties.
fn paragraphs_from_document_xml(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_run => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Builds minimal DOCX payloads for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCX_BODY_PART, zip::write::FileOptions::default())
        .expect("start docx part");
    writer.write_all(xml.as_bytes()).expect("write docx part");
    writer.finish().expect("finish docx").into_inner()
}
