use std::time::Duration;

use uuid::Uuid;

/// Delay between opening the editor and the auto-triggered export, so the
/// full-scale preview is rendered before printing.
pub const AUTO_EXPORT_DELAY: Duration = Duration::from_millis(500);

const DOWNLOAD_MARKER: &str = "download";

/// Navigable editor address: `/editor/{id}` plus any query parameters.
///
/// Parameters are held decoded and in request order; `Display` re-encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorAddress {
    pub resume_id: Uuid,
    params: Vec<(String, String)>,
}

impl EditorAddress {
    /// Builds an address from the resume id and the decoded query pairs.
    pub fn new(resume_id: Uuid, params: Vec<(String, String)>) -> Self {
        Self { resume_id, params }
    }

    /// True when the address asks for an export on open (`download=true`).
    pub fn wants_download(&self) -> bool {
        self.params
            .iter()
            .any(|(k, v)| k == DOWNLOAD_MARKER && v == "true")
    }

    /// The same address with every download marker removed, so a reload of it
    /// does not export again.
    pub fn without_download_marker(&self) -> Self {
        Self {
            resume_id: self.resume_id,
            params: self
                .params
                .iter()
                .filter(|(k, _)| k != DOWNLOAD_MARKER)
                .cloned()
                .collect(),
        }
    }
}

impl std::fmt::Display for EditorAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/editor/{}", self.resume_id)?;
        if !self.params.is_empty() {
            let query = serde_urlencoded::to_string(&self.params).map_err(|_| std::fmt::Error)?;
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes a raw query string the way the `Query` extractor does.
    fn address(id: Uuid, query: &str) -> EditorAddress {
        EditorAddress::new(id, serde_urlencoded::from_str(query).unwrap())
    }

    #[test]
    fn test_download_marker_is_detected_and_stripped() {
        let id = Uuid::new_v4();
        let address = address(id, "download=true");
        assert!(address.wants_download());

        let clean = address.without_download_marker();
        assert!(!clean.wants_download());
        assert_eq!(clean.to_string(), format!("/editor/{id}"));
    }

    #[test]
    fn test_other_params_are_kept() {
        let id = Uuid::new_v4();
        let clean = address(id, "tab=skills&download=true").without_download_marker();
        assert_eq!(clean.to_string(), format!("/editor/{id}?tab=skills"));
    }

    #[test]
    fn test_only_true_triggers_download() {
        let id = Uuid::new_v4();
        assert!(!address(id, "download=false").wants_download());
        assert!(!address(id, "download").wants_download());
        assert!(!EditorAddress::new(id, Vec::new()).wants_download());
    }

    #[test]
    fn test_percent_encoded_marker_is_decoded_and_stripped() {
        let id = Uuid::new_v4();
        let encoded = address(id, "d%6Fwnload=%74rue&note=a%26b");
        assert!(encoded.wants_download());

        let clean = encoded.without_download_marker();
        assert!(!clean.wants_download());
        assert_eq!(clean.to_string(), format!("/editor/{id}?note=a%26b"));
    }
}
