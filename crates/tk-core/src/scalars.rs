//! Custom scalar decoders for the shapes the upstream feed actually sends.
//!
//! The OData feed mixes three date representations and renders dossier
//! numbers as either a JSON string or a JSON number; §6/§9 require one
//! decoder per concern used across every field of that shape.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A date/time field from the upstream feed.
///
/// Accepts RFC 3339 with offset, RFC 3339 without offset (assumed UTC), and
/// bare `YYYY-MM-DD`. The upstream's year-1 sentinel (`0001-01-01...`) means
/// "no value" and decodes to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OdataDate(pub Option<DateTime<Utc>>);

impl OdataDate {
    #[must_use]
    pub const fn some(dt: DateTime<Utc>) -> Self {
        Self(Some(dt))
    }

    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn into_inner(self) -> Option<DateTime<Utc>> {
        self.0
    }

    fn parse(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("0001-01-01") {
            return Ok(None);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }

        // RFC 3339 without an offset: parse as naive, assume UTC.
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Some(Utc.from_utc_datetime(&naive)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| raw.to_string())?;
            return Ok(Some(Utc.from_utc_datetime(&naive)));
        }

        Err(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for OdataDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = OdataDate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 or YYYY-MM-DD date string, or null")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                OdataDate::parse(v)
                    .map(OdataDate)
                    .map_err(|raw| de::Error::custom(format!("unrecognized date shape: {raw}")))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OdataDate(None))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OdataDate(None))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl Serialize for OdataDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

/// A dossier `Nummer` field: the upstream sometimes emits it as a JSON
/// number, sometimes as a string. Canonicalizes to a string with no
/// trailing decimals either way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DossierNumber(pub String);

impl fmt::Display for DossierNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DossierNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = DossierNumber;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a dossier number as a string or integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DossierNumber(v.trim().to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DossierNumber(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DossierNumber(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // the upstream renders whole numbers; drop a trailing ".0"
                if v.fract() == 0.0 {
                    Ok(DossierNumber(format!("{v:.0}")))
                } else {
                    Ok(DossierNumber(v.to_string()))
                }
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl Serialize for DossierNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let v: OdataDate = serde_json::from_str(r#""2024-03-01T10:00:00+01:00""#).unwrap();
        assert!(v.into_inner().is_some());
    }

    #[test]
    fn parses_rfc3339_without_offset() {
        let v: OdataDate = serde_json::from_str(r#""2024-03-01T10:00:00""#).unwrap();
        assert!(v.into_inner().is_some());
    }

    #[test]
    fn parses_bare_date() {
        let v: OdataDate = serde_json::from_str(r#""2024-03-01""#).unwrap();
        assert!(v.into_inner().is_some());
    }

    #[test]
    fn year_one_sentinel_is_none() {
        let v: OdataDate = serde_json::from_str(r#""0001-01-01T00:00:00""#).unwrap();
        assert_eq!(v.into_inner(), None);
    }

    #[test]
    fn dossier_number_accepts_string_and_integer() {
        let from_str: DossierNumber = serde_json::from_str(r#""36410""#).unwrap();
        let from_num: DossierNumber = serde_json::from_str("36410").unwrap();
        assert_eq!(from_str.0, "36410");
        assert_eq!(from_num.0, "36410");
    }

    #[test]
    fn dossier_number_drops_trailing_decimal() {
        let from_float: DossierNumber = serde_json::from_str("36410.0").unwrap();
        assert_eq!(from_float.0, "36410");
    }
}
