//! PII redaction pre-pass and text hashing.

use regex::Regex;
use sha2::{Digest, Sha256};

/// Replace email-like, phone-like and national-ID-like tokens before the text
/// reaches extraction or any output file. Returns the redacted text and
/// whether anything was hit.
pub fn redact_pii(text: &str) -> (String, bool) {
    let email = Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap();
    let phone =
        Regex::new(r"(?:(?:\+?86)?\s*)?(?:1[3-9]\d{9})\b|(?:\b\d{3}[-\s]?\d{3}[-\s]?\d{4}\b)")
            .unwrap();
    let id_cn = Regex::new(r"\b\d{17}[\dXx]\b").unwrap();

    let mut hit = false;
    let mut redacted = text.to_string();
    for (pattern, replacement) in [
        (&email, "[REDACTED_EMAIL]"),
        (&phone, "[REDACTED_PHONE]"),
        (&id_cn, "[REDACTED_ID]"),
    ] {
        if pattern.is_match(&redacted) {
            redacted = pattern.replace_all(&redacted, replacement).into_owned();
            hit = true;
        }
    }
    (redacted, hit)
}

/// Hex-encoded SHA-256 of the raw text. Stored instead of the full transcript.
pub fn text_sha256(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_redacted() {
        let (redacted, hit) = redact_pii("联系人 zhang.wei@example.com 请回复");
        assert!(hit);
        assert!(redacted.contains("[REDACTED_EMAIL]"));
        assert!(!redacted.contains("example.com"));
    }

    #[test]
    fn cn_mobile_numbers_are_redacted() {
        let (redacted, hit) = redact_pii("电话 13812345678，随时联系");
        assert!(hit);
        assert!(redacted.contains("[REDACTED_PHONE]"));
        assert!(!redacted.contains("13812345678"));
    }

    #[test]
    fn cn_national_ids_are_redacted() {
        let (redacted, hit) = redact_pii("身份证 11010519491231002X 已登记");
        assert!(hit);
        assert!(redacted.contains("[REDACTED_ID]"));
    }

    #[test]
    fn clean_text_passes_through() {
        let text = "客户：ABC有限公司，预算：10万";
        let (redacted, hit) = redact_pii(text);
        assert!(!hit);
        assert_eq!(redacted, text);
    }

    #[test]
    fn hash_is_stable_and_hex() {
        let a = text_sha256("abc");
        let b = text_sha256("abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_eq!(
            a,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
