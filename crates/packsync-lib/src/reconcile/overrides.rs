//! Override payload decoding
//!
//! Override keys come from the modpack manifest. Whether a payload is text or
//! base64 is not recorded there, so it is inferred from the key: anything with
//! a file extension is treated as base64. This is a manifest convention and
//! not a content-type sniff; `config/options.txt` is decoded as base64 too.

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Literal manifest prefix stripped from override keys (case-insensitive)
pub const OVERRIDES_PREFIX: &str = "overrides/";

const DATA_URI_SCHEME: &str = "data:";
const DATA_URI_BASE64_MARKER: &str = ";base64,";

/// Standard alphabet, padding optional; URL-safe input is mapped onto it first
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Override decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid base64 payload for '{key}': {source}")]
    InvalidBase64 {
        key: String,
        source: base64::DecodeError,
    },

    #[error("Override key '{key}' resolves to an empty path")]
    EmptyPath { key: String },

    #[error("Override key '{key}' escapes the instance directory")]
    UnsafePath { key: String },
}

/// A decoded override ready to be written under the instance root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOverride {
    pub relative_path: PathBuf,
    pub bytes: Vec<u8>,
    pub binary: bool,
}

/// Classification policy: binary when the key has a non-empty suffix after
/// its last `.`
///
/// A dot at the very start of the key does not count, so `.gitignore` is text.
/// The whole key is inspected, so a dot in a directory name (`config.d/README`)
/// also classifies as binary.
pub fn is_binary_key(key: &str) -> bool {
    match key.rfind('.') {
        None | Some(0) => false,
        Some(idx) => idx + 1 < key.len(),
    }
}

/// Remove a leading `overrides/` segment, ignoring ASCII case
pub fn strip_overrides_prefix(key: &str) -> &str {
    match key.get(..OVERRIDES_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(OVERRIDES_PREFIX) => &key[OVERRIDES_PREFIX.len()..],
        _ => key,
    }
}

/// Drop a `data:<mime>;base64,` header if present
pub fn strip_data_uri(content: &str) -> &str {
    if let Some(rest) = content.strip_prefix(DATA_URI_SCHEME) {
        if let Some(idx) = rest.find(DATA_URI_BASE64_MARKER) {
            return &rest[idx + DATA_URI_BASE64_MARKER.len()..];
        }
    }
    content
}

/// Decodes override entries into destination paths and bytes
pub struct OverrideDecoder;

impl OverrideDecoder {
    /// Resolve the destination path for `key` and decode `content`
    pub fn decode(key: &str, content: &str) -> Result<DecodedOverride, DecodeError> {
        let relative_path = Self::destination(key)?;

        if !is_binary_key(key) {
            return Ok(DecodedOverride {
                relative_path,
                bytes: content.as_bytes().to_vec(),
                binary: false,
            });
        }

        let payload: String = strip_data_uri(content)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                c => c,
            })
            .collect();

        let bytes = LENIENT_BASE64
            .decode(payload.as_bytes())
            .map_err(|source| DecodeError::InvalidBase64 {
                key: key.to_string(),
                source,
            })?;

        Ok(DecodedOverride {
            relative_path,
            bytes,
            binary: true,
        })
    }

    /// Relative destination for `key` under the instance root
    pub fn destination(key: &str) -> Result<PathBuf, DecodeError> {
        let stripped = Path::new(strip_overrides_prefix(key));

        let mut relative = PathBuf::new();
        for component in stripped.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(DecodeError::UnsafePath {
                        key: key.to_string(),
                    });
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(DecodeError::EmptyPath {
                key: key.to_string(),
            });
        }

        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    include!("overrides.test.rs");
}
