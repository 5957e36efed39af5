//! Outbound payload for the analysis workflow.

use base64::Engine as _;
use bidgate_core::enums::DocumentKind;
use bidgate_core::evidence::{self, CategoryCount};
use serde::Serialize;

use crate::AnalysisError;

/// An uploaded tender document.
#[derive(Debug, Clone)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// Body posted to the workflow webhook.
///
/// Exactly one of `file_base64` and `text` is present: binary documents travel
/// encoded, plain text travels inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisPayload {
    pub client_id: String,
    pub tender_name: String,
    pub file_name: String,
    pub file_type: DocumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// True when `text` was cut to the character limit.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub text_truncated: bool,
    pub evidence_counts: Vec<CategoryCount>,
    pub total_evidence: usize,
}

/// Classify an upload by its file name.
///
/// # Errors
///
/// Returns [`AnalysisError::UnsupportedFile`] for anything other than
/// pdf, docx, doc, txt, md, or csv.
pub fn classify(file_name: &str) -> Result<DocumentKind, AnalysisError> {
    DocumentKind::from_file_name(file_name)
        .ok_or_else(|| AnalysisError::UnsupportedFile(file_name.to_string()))
}

/// Decode text lossily and keep at most `max_chars` characters.
///
/// Returns the text and whether anything was dropped.
#[must_use]
pub fn truncate_text(bytes: &[u8], max_chars: usize) -> (String, bool) {
    let text = String::from_utf8_lossy(bytes);
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (text[..cut].to_string(), true),
        None => (text.into_owned(), false),
    }
}

impl AnalysisPayload {
    /// Build the payload for `upload`, attaching the client's evidence tally.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnsupportedFile`] or [`AnalysisError::EmptyFile`].
    pub fn build(
        upload: &Upload<'_>,
        client_id: &str,
        tender_name: &str,
        evidence_counts: Vec<CategoryCount>,
        max_text_chars: usize,
    ) -> Result<Self, AnalysisError> {
        let kind = classify(upload.file_name)?;
        if upload.bytes.is_empty() {
            return Err(AnalysisError::EmptyFile);
        }

        let (file_base64, text, text_truncated) = if kind.is_binary() {
            let encoded = base64::engine::general_purpose::STANDARD.encode(upload.bytes);
            (Some(encoded), None, false)
        } else {
            let (text, truncated) = truncate_text(upload.bytes, max_text_chars);
            (None, Some(text), truncated)
        };

        Ok(Self {
            client_id: client_id.to_string(),
            tender_name: tender_name.to_string(),
            file_name: upload.file_name.to_string(),
            file_type: kind,
            file_base64,
            text,
            text_truncated,
            total_evidence: evidence::total(&evidence_counts),
            evidence_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidgate_core::enums::EvidenceCategory;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn build(file_name: &str, bytes: &[u8], max: usize) -> Result<AnalysisPayload, AnalysisError> {
        AnalysisPayload::build(
            &Upload { file_name, bytes },
            "c1",
            "Library refit",
            vec![CategoryCount {
                category: EvidenceCategory::Policy,
                count: 3,
            }],
            max,
        )
    }

    #[rstest]
    #[case("tender.pdf", DocumentKind::Pdf)]
    #[case("Tender.DOCX", DocumentKind::Docx)]
    #[case("old.doc", DocumentKind::Doc)]
    #[case("notes.md", DocumentKind::Text)]
    #[case("pricing.csv", DocumentKind::Text)]
    fn accepted_kinds(#[case] name: &str, #[case] kind: DocumentKind) {
        assert_eq!(classify(name).unwrap(), kind);
    }

    #[rstest]
    #[case("image.png")]
    #[case("archive.tar.gz")]
    #[case("README")]
    fn rejected_kinds(#[case] name: &str) {
        assert!(matches!(classify(name), Err(AnalysisError::UnsupportedFile(n)) if n == name));
    }

    #[test]
    fn binary_is_encoded_and_text_is_absent() {
        let payload = build("tender.pdf", b"%PDF-1.7", 10).unwrap();
        assert_eq!(payload.file_base64.as_deref(), Some("JVBERi0xLjc="));
        assert!(payload.text.is_none());
        assert_eq!(payload.total_evidence, 3);
    }

    #[test]
    fn oversized_text_is_truncated_and_not_encoded() {
        let body = "a".repeat(60_000);
        let payload = build("tender.txt", body.as_bytes(), 50_000).unwrap();
        assert_eq!(payload.text.as_ref().map(String::len), Some(50_000));
        assert!(payload.text_truncated);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("file_base64").is_none());
        assert_eq!(json["file_type"], "text");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let (text, truncated) = truncate_text("héllo wörld".as_bytes(), 5);
        assert_eq!(text, "héllo");
        assert!(truncated);

        let (text, truncated) = truncate_text(b"short", 5);
        assert_eq!(text, "short");
        assert!(!truncated);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let (text, _) = truncate_text(&[b'o', b'k', 0xff], 10);
        assert_eq!(text, "ok\u{fffd}");
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert!(matches!(build("tender.pdf", b"", 10), Err(AnalysisError::EmptyFile)));
    }
}
