//! # PEM Bundle Splitting
//!
//! The issuer returns every PEM block of a request concatenated into one
//! string field. Claims and tokens come from different backend flows and
//! are split differently:
//!
//! - **Claims**: a boundary is a block's closing `-` followed by a line break
//!   (`\n` or `\r\n`) and the next block's opening `-`. The earlier entry
//!   keeps its trailing `-\n` (a CRLF boundary is normalized to LF), the later
//!   entry begins at its `-----BEGIN`. Boundaries do not overlap: the `-` that
//!   opens a block is never also the closing `-` of another boundary.
//! - **Tokens**: the string is split on the literal [`PEM_BEGIN_MARKER`], and
//!   the marker is dropped. Input that starts with the marker therefore
//!   yields a leading empty entry; [`PemBundle::join_tokens`] restores the
//!   input exactly.

use serde::Serialize;

/// Header prefix of every PEM block.
pub const PEM_BEGIN_MARKER: &str = "-----BEGIN";

/// Ordered PEM entries split out of a single backend string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PemBundle {
    entries: Vec<String>,
}

impl PemBundle {
    /// Split a claim bundle on line-break boundaries between PEM blocks.
    pub fn split_claims(pems: &str) -> Self {
        let mut entries = Vec::new();
        let mut rest = pems;
        let mut search_from = 0;
        while let Some((at, sep_len)) = find_claim_boundary(rest, search_from) {
            let mut entry = String::with_capacity(at + 2);
            entry.push_str(&rest[..at]);
            entry.push_str("-\n");
            entries.push(entry);
            rest = &rest[at + sep_len..];
            // The opening '-' belongs to the boundary just consumed.
            search_from = 1;
        }
        entries.push(rest.to_string());
        Self { entries }
    }

    /// Split a token bundle on [`PEM_BEGIN_MARKER`], discarding the marker.
    pub fn split_tokens(pems: &str) -> Self {
        Self {
            entries: pems.split(PEM_BEGIN_MARKER).map(str::to_owned).collect(),
        }
    }

    /// Re-join token entries with [`PEM_BEGIN_MARKER`].
    pub fn join_tokens(&self) -> String {
        self.entries.join(PEM_BEGIN_MARKER)
    }

    /// Concatenate the entries as-is. For a claim bundle this is the input
    /// with CRLF boundaries normalized to LF.
    pub fn concat(&self) -> String {
        self.entries.concat()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

impl IntoIterator for PemBundle {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PemBundle {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Find the next `-\n-` or `-\r\n-` at or after `from`. Returns the index of
/// the closing `-` and the length of `-\n` / `-\r\n`.
fn find_claim_boundary(s: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    (from..bytes.len()).find_map(|i| {
        if bytes[i] != b'-' {
            return None;
        }
        let tail = &bytes[i + 1..];
        if tail.starts_with(b"\n-") {
            Some((i, 2))
        } else if tail.starts_with(b"\r\n-") {
            Some((i, 3))
        } else {
            None
        }
    })
}
