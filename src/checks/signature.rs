//! Malware signature scan
//!
//! Exact substring matching against a small denylist of known signatures.
//! A hit is an absolute override: the fusion engine forces MALICIOUS no
//! matter what any other signal says.

use serde::{Deserialize, Serialize};

/// The industry-standard antivirus test string. Split in two so this source
/// file does not itself carry the contiguous signature.
const EICAR_HEAD: &str = "X5O!P%@AP[4\\PZX54(P^)7CC)7}$EICAR";
const EICAR_TAIL: &str = "-STANDARD-ANTIVIRUS-TEST-FILE!$H+H*";

/// PHP web-shell indicators: an opening tag plus an execution primitive.
const PHP_OPEN_TAG: &str = "<?php";
const PHP_EXEC_MARKERS: &[&str] = &["shell_exec", "system("];

/// A matched malware signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureHit {
    /// Stable signature name
    pub name: String,
    /// Human-readable detection line
    pub description: String,
}

/// Scan raw bytes for known malware signatures.
///
/// Bytes are interpreted as lossy UTF-8; binary noise cannot make the scan
/// fail, only miss. Returns `None` when nothing matches.
pub fn scan_signatures(content: &[u8]) -> Option<SignatureHit> {
    let text = String::from_utf8_lossy(content);
    let eicar: String = format!("{}{}", EICAR_HEAD, EICAR_TAIL);

    if text.contains(&eicar) {
        return Some(SignatureHit {
            name: "eicar-test-file".to_string(),
            description: "DETECTED: EICAR-Test-File (Harmless Malware Test Signature)"
                .to_string(),
        });
    }

    if text.contains(PHP_OPEN_TAG) && PHP_EXEC_MARKERS.iter().any(|m| text.contains(m)) {
        return Some(SignatureHit {
            name: "php-web-shell".to_string(),
            description: "DETECTED: Suspicious PHP Executable Code (Potential Web Shell)"
                .to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eicar_string() -> String {
        format!("{}{}", EICAR_HEAD, EICAR_TAIL)
    }

    #[test]
    fn test_eicar_detected() {
        let hit = scan_signatures(eicar_string().as_bytes()).unwrap();
        assert_eq!(hit.name, "eicar-test-file");
    }

    #[test]
    fn test_eicar_embedded_in_larger_document() {
        let padded = format!("%PDF-1.4 junk {} trailing bytes", eicar_string());
        assert!(scan_signatures(padded.as_bytes()).is_some());
    }

    #[test]
    fn test_php_shell_requires_both_markers() {
        assert!(scan_signatures(b"<?php echo 'hello'; ?>").is_none());
        assert!(scan_signatures(b"shell_exec without php tag").is_none());

        let hit = scan_signatures(b"<?php shell_exec($_GET['c']); ?>").unwrap();
        assert_eq!(hit.name, "php-web-shell");

        let hit = scan_signatures(b"<?php system($_POST['cmd']); ?>").unwrap();
        assert_eq!(hit.name, "php-web-shell");
    }

    #[test]
    fn test_clean_content() {
        assert!(scan_signatures(b"An ordinary invoice about office supplies").is_none());
        assert!(scan_signatures(b"").is_none());
    }

    #[test]
    fn test_binary_noise_does_not_break_scan() {
        let mut bytes = vec![0xff, 0xfe, 0x00, 0x01];
        bytes.extend_from_slice(eicar_string().as_bytes());
        bytes.extend_from_slice(&[0x80, 0x81]);
        assert!(scan_signatures(&bytes).is_some());
    }
}
