use once_cell::sync::Lazy;
use regex::Regex;

use crate::storage::errors::StorageError;

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<Key>([^<]*)</Key>").expect("valid regex"));
static NEXT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<NextContinuationToken>([^<]*)</NextContinuationToken>").expect("valid regex")
});
static TRUNCATED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<IsTruncated>\s*true\s*</IsTruncated>").expect("valid regex"));

/// One page of a ListObjectsV2 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub keys: Vec<String>,
    /// Continuation token for the next page, when the listing was
    /// truncated.
    pub next_token: Option<String>,
}

/// Extracts keys and the continuation token from a ListObjectsV2 body.
///
/// The response grammar is flat enough that anchored patterns are
/// sufficient; a full XML parser would add a dependency for three tags.
pub fn parse_list_page(xml: &str) -> Result<ListPage, StorageError> {
    if !xml.contains("<ListBucketResult") {
        return Err(StorageError::MalformedListing(
            "missing ListBucketResult element".to_string(),
        ));
    }

    let mut keys = Vec::new();
    for capture in KEY_RE.captures_iter(xml) {
        keys.push(xml_unescape(&capture[1])?);
    }

    let truncated = TRUNCATED_RE.is_match(xml);
    let next_token = match NEXT_TOKEN_RE.captures(xml) {
        Some(capture) => Some(xml_unescape(&capture[1])?),
        None if truncated => {
            return Err(StorageError::MalformedListing(
                "truncated listing without a continuation token".to_string(),
            ));
        }
        None => None,
    };

    Ok(ListPage { keys, next_token })
}

/// Decodes the five predefined XML entities plus numeric references,
/// which is everything S3 emits inside `<Key>`.
pub(crate) fn xml_unescape(input: &str) -> Result<String, StorageError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = tail.find(';').ok_or_else(|| {
            StorageError::MalformedListing(format!("unterminated entity in {input:?}"))
        })?;
        let entity = &tail[1..end];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let code = entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .transpose()
                    .ok()
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        StorageError::MalformedListing(format!(
                            "unknown entity &{entity}; in {input:?}"
                        ))
                    })?;
                out.push(code);
            }
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
