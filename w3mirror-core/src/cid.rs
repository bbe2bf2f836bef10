use serde::{Deserialize, Serialize};
use std::fmt;

pub const GATEWAY_HOST: &str = "ipfs.dweb.link";

/// Content identifier returned by the storage network for an upload.
///
/// Treated as opaque apart from a shape check: CIDv1 in base32 (`bafy...`)
/// or CIDv0 in base58 (`Qm...`), both purely alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() < 8 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Subdomain gateway URL: `https://{cid}.ipfs.dweb.link`
    pub fn gateway_url(&self) -> String {
        format!("https://{}.{}", self.0, GATEWAY_HOST)
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_shape() {
        let cid = Cid::parse("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi").unwrap();
        assert_eq!(
            cid.gateway_url(),
            "https://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi.ipfs.dweb.link"
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let cid = Cid::parse("  QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG\n").unwrap();
        assert_eq!(cid.as_str(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
        assert_eq!(cid.to_string(), cid.as_str());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Cid::parse(""), None);
        assert_eq!(Cid::parse("short"), None);
        assert_eq!(Cid::parse("https://w3s.link/ipfs/bafy"), None);
        assert_eq!(Cid::parse("bafy with spaces inside"), None);
    }
}
