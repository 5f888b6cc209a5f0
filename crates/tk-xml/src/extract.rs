//! Decodes a motion document and yields its ordered clause list (C3, §4.3).
//!
//! Structure mirrors the publication's own nesting:
//! `OfficielePublicatie` → `Kamerstuk` → `Stuk` → `Algemeen[]` →
//! `VrijeTekst` → `Al[]` (each `Al` a single leaf text node).

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::Deserialize;
use url::Url;

use crate::error::XmlError;

/// The three literal section markers kept as clauses. The marker strings
/// themselves are the clause text — the sentences that follow them in the
/// source document are dropped, not appended.
const CLAUSE_MARKERS: [&str; 3] = ["constaterende", "overwegende", "verzoekt"];

#[derive(Debug, Deserialize)]
struct OfficielePublicatie {
    #[serde(rename = "Kamerstuk")]
    kamerstuk: Kamerstuk,
}

#[derive(Debug, Deserialize)]
struct Kamerstuk {
    #[serde(rename = "Stuk")]
    stuk: Stuk,
}

#[derive(Debug, Deserialize)]
struct Stuk {
    #[serde(rename = "Titel")]
    titel: String,
    #[serde(rename = "Algemeen", default)]
    algemeen: Vec<Algemeen>,
}

#[derive(Debug, Deserialize)]
struct Algemeen {
    #[serde(rename = "VrijeTekst", default)]
    vrije_tekst: Option<VrijeTekst>,
}

#[derive(Debug, Deserialize)]
struct VrijeTekst {
    #[serde(rename = "Al", default)]
    als: Vec<Al>,
}

#[derive(Debug, Deserialize)]
struct Al {
    #[serde(rename = "$text", default)]
    text: String,
}

/// The result of successfully extracting a motion document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMotion {
    pub title: String,
    pub clauses: Vec<String>,
    pub fetched_url: Url,
}

fn resolve_encoding(bytes: &[u8]) -> Result<&'static Encoding, XmlError> {
    let prolog_len = bytes.len().min(200);
    let prolog = String::from_utf8_lossy(&bytes[..prolog_len]);

    let Some(start) = prolog.find("encoding=") else {
        return Ok(UTF_8);
    };
    let rest = &prolog[start + "encoding=".len()..];
    let quote = rest.chars().next();
    let Some(quote) = quote else { return Ok(UTF_8) };
    let rest = &rest[1..];
    let Some(end) = rest.find(quote) else {
        return Ok(UTF_8);
    };
    let declared = rest[..end].to_ascii_lowercase();

    match declared.as_str() {
        "utf-8" | "utf8" => Ok(UTF_8),
        "us-ascii" | "ascii" => Ok(encoding_rs::WINDOWS_1252), // us-ascii is a strict subset
        "iso-8859-1" | "latin1" => Ok(WINDOWS_1252), // superset, safe for the 7-bit+Latin-1 range used here
        "windows-1252" | "cp1252" => Ok(WINDOWS_1252),
        other => Err(XmlError::UnknownCharset(other.to_string())),
    }
}

/// Decodes raw document bytes and extracts a motion's title and ordered
/// clause list, or `None` when the document is not a motion.
///
/// # Errors
/// Returns [`XmlError::UnknownCharset`] for an undeclared/unsupported
/// encoding and [`XmlError::ParseError`] for malformed XML.
pub fn extract(bytes: &[u8], fetched_url: Url) -> Result<Option<ExtractedMotion>, XmlError> {
    let encoding = resolve_encoding(bytes)?;
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(XmlError::ParseError("charset decode produced replacement characters".to_string()));
    }

    let publicatie: OfficielePublicatie =
        quick_xml::de::from_str(&decoded).map_err(|e| XmlError::ParseError(e.to_string()))?;

    let title = publicatie.kamerstuk.stuk.titel;
    if !is_motion_title(&title) {
        return Ok(None);
    }

    let clauses = publicatie
        .kamerstuk
        .stuk
        .algemeen
        .iter()
        .filter_map(|a| a.vrije_tekst.as_ref())
        .flat_map(|vt| vt.als.iter())
        .map(|al| al.text.trim())
        .filter(|text| CLAUSE_MARKERS.contains(text))
        .map(ToString::to_string)
        .collect();

    Ok(Some(ExtractedMotion { title, clauses, fetched_url }))
}

/// Whole-word check for "motie" in the lowercased, trimmed piece title
/// (§4.3 step 3).
fn is_motion_title(title: &str) -> bool {
    title
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "motie")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OfficielePublicatie>
  <Kamerstuk>
    <Stuk>
      <Titel>Motie van het lid Jansen over klimaatbeleid</Titel>
      <Algemeen>
        <VrijeTekst>
          <Al>constaterende</Al>
          <Al>dat het klimaat verandert,</Al>
          <Al>overwegende</Al>
          <Al>dat actie nodig is,</Al>
          <Al>verzoekt</Al>
          <Al>de regering actie te ondernemen,</Al>
        </VrijeTekst>
      </Algemeen>
    </Stuk>
  </Kamerstuk>
</OfficielePublicatie>"#
    }

    fn non_motion_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OfficielePublicatie>
  <Kamerstuk>
    <Stuk>
      <Titel>Verslag van een schriftelijk overleg</Titel>
      <Algemeen>
        <VrijeTekst>
          <Al>Dit is geen motie.</Al>
        </VrijeTekst>
      </Algemeen>
    </Stuk>
  </Kamerstuk>
</OfficielePublicatie>"#
    }

    #[test]
    fn extracts_clause_markers_in_order() {
        let url = Url::parse("https://example.test/kst-1-1.xml").unwrap();
        let result = extract(motion_xml().as_bytes(), url).unwrap().unwrap();
        assert_eq!(result.clauses, vec!["constaterende", "overwegende", "verzoekt"]);
    }

    #[test]
    fn non_motion_returns_none() {
        let url = Url::parse("https://example.test/kst-1-1.xml").unwrap();
        let result = extract(non_motion_xml().as_bytes(), url).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn motion_word_boundary_does_not_match_substring() {
        assert!(!is_motion_title("Motieven voor beleid"));
        assert!(is_motion_title("Motie over klimaat"));
    }
}
