//! Raw-text normalization of ReqIF XML before DOM parsing.
//!
//! Some producing tools prefix every element (`reqif:SPEC-OBJECT`), emit a
//! UTF-8 BOM, or write junk ahead of the XML declaration. All of that
//! breaks strict parsers downstream, so it is folded away here with plain
//! text transforms, before any DOM is built.

use regex::Regex;
use std::sync::LazyLock;

/// Opening tag with a known ReqIF namespace prefix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIXED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(reqif|r):([A-Z])").expect("valid regex"));

/// Closing tag with a known ReqIF namespace prefix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIXED_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(reqif|r):([A-Z])").expect("valid regex"));

/// The XML declaration.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static XML_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?xml[^?]*\?>").expect("valid regex"));

/// A default namespace declaration on the root element.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEFAULT_XMLNS_ON_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<REQ-IF[^>]+xmlns=""#).expect("valid regex"));

/// A prefixed ReqIF namespace declaration.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIXED_XMLNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"xmlns:(reqif|r)=").expect("valid regex"));

/// A redundant prefixed declaration, including leading whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REDUNDANT_PREFIXED_XMLNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s+xmlns:(reqif|r)="[^"]*""#).expect("valid regex"));

/// Normalize raw ReqIF text so that common vendor quirks parse.
///
/// Applied transforms, in order:
/// 1. Strip a UTF-8 BOM.
/// 2. Drop anything before the XML declaration.
/// 3. Fold `reqif:`/`r:` element prefixes to unprefixed names.
/// 4. Rewrite `xmlns:reqif=`/`xmlns:r=` to a default `xmlns=` unless the
///    root already declares one; in that case drop the now-redundant
///    prefixed declarations instead.
///
/// Pure text transform; no DOM is built.
#[must_use]
pub fn normalize_reqif(content: &str) -> String {
    let mut content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if let Some(declaration) = XML_DECLARATION.find(content) {
        content = &content[declaration.start()..];
    }

    let content = PREFIXED_OPEN.replace_all(content, "<$2");
    let content = PREFIXED_CLOSE.replace_all(&content, "</$2");

    if DEFAULT_XMLNS_ON_ROOT.is_match(&content) {
        REDUNDANT_PREFIXED_XMLNS
            .replace_all(&content, "")
            .into_owned()
    } else {
        PREFIXED_XMLNS.replace_all(&content, "xmlns=").into_owned()
    }
}
