use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// CreatedAt — Listing creation timestamp as stored by the property service
// ---------------------------------------------------------------------------

/// Creation timestamp of a listing, in whichever shape the API delivered it.
///
/// The property service emits either a plain date value or the extended-JSON
/// wrapper `{ "$date": { "$numberLong": "<epoch ms>" } }`. Shapes that match
/// neither are kept as [`CreatedAt::Unrecognized`] so that one bad record
/// never fails decoding of the whole listing array.
///
/// Call [`CreatedAt::normalize`] to obtain a concrete instant.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedAt {
    /// An RFC 3339 / ISO date string or a JSON number of epoch milliseconds.
    Plain(DateTime<Utc>),
    /// The `$numberLong` payload of a wrapped timestamp, not yet parsed.
    WrappedEpochMs(String),
    /// Anything else, including `null` and a missing field.
    Unrecognized(Value),
}

impl Default for CreatedAt {
    fn default() -> Self {
        CreatedAt::Unrecognized(Value::Null)
    }
}

impl CreatedAt {
    /// Classify a raw JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => match parse_date_str(s) {
                Some(dt) => CreatedAt::Plain(dt),
                None => CreatedAt::Unrecognized(value.clone()),
            },
            Value::Number(_) => match epoch_ms_from_number(value) {
                Some(dt) => CreatedAt::Plain(dt),
                None => CreatedAt::Unrecognized(value.clone()),
            },
            Value::Object(map) => Self::from_wrapped(map).unwrap_or_else(|| {
                CreatedAt::Unrecognized(value.clone())
            }),
            _ => CreatedAt::Unrecognized(value.clone()),
        }
    }

    /// `{ "$date": { "$numberLong": ".." } }`, plus the relaxed
    /// `{ "$date": "<iso>" }` and `{ "$date": <ms> }` forms.
    fn from_wrapped(map: &Map<String, Value>) -> Option<Self> {
        match map.get("$date")? {
            Value::Object(inner) => match inner.get("$numberLong")? {
                Value::String(ms) => Some(CreatedAt::WrappedEpochMs(ms.clone())),
                n @ Value::Number(_) => Some(CreatedAt::WrappedEpochMs(n.to_string())),
                _ => None,
            },
            Value::String(s) => parse_date_str(s).map(CreatedAt::Plain),
            n @ Value::Number(_) => epoch_ms_from_number(n).map(CreatedAt::Plain),
            _ => None,
        }
    }

    /// Resolve to a concrete UTC instant, or `None` when the value cannot be
    /// interpreted (unparseable `$numberLong`, unknown shape, missing).
    pub fn normalize(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::Plain(dt) => Some(*dt),
            CreatedAt::WrappedEpochMs(ms) => ms
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            CreatedAt::Unrecognized(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            CreatedAt::Plain(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            CreatedAt::WrappedEpochMs(ms) => json!({ "$date": { "$numberLong": ms } }),
            CreatedAt::Unrecognized(v) => v.clone(),
        }
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(dt: DateTime<Utc>) -> Self {
        CreatedAt::Plain(dt)
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(CreatedAt::from_value(&value))
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn epoch_ms_from_number(value: &Value) -> Option<DateTime<Utc>> {
    let ms = match value.as_i64() {
        Some(ms) => ms,
        None => {
            let f = value.as_f64()?;
            if !f.is_finite() {
                return None;
            }
            f.trunc() as i64
        }
    };
    DateTime::<Utc>::from_timestamp_millis(ms)
}

// ---------------------------------------------------------------------------
// Price coercion
// ---------------------------------------------------------------------------

/// Coerce a raw price value to a number.
///
/// Numbers pass through, strings are trimmed and parsed (empty is `0`),
/// booleans map to `1`/`0`. Everything else, and any result that is not
/// finite, becomes `0.0`.
pub fn coerce_price(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// PropertyRecord — One listing as returned by the property service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(rename = "_id", default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::string")]
    pub status: String,
    #[serde(default, deserialize_with = "de::string")]
    pub address: String,
    #[serde(default, deserialize_with = "de::string")]
    pub price_type: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_type: String,
    /// Raw price as delivered (often a string). See [`PropertyRecord::price_amount`].
    #[serde(default)]
    pub price: Value,
    #[serde(default, deserialize_with = "de::string")]
    pub rooms: String,
    #[serde(default, deserialize_with = "de::string")]
    pub bathrooms: String,
    #[serde(default, deserialize_with = "de::string")]
    pub property_size: String,
    #[serde(default, deserialize_with = "de::boolean")]
    pub is_available: bool,
    #[serde(default, deserialize_with = "de::features")]
    pub features: HashMap<String, bool>,
    #[serde(default, deserialize_with = "de::strings")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "de::strings")]
    pub documents: Vec<String>,
    #[serde(default)]
    pub created_at: CreatedAt,
}

impl PropertyRecord {
    /// Price coerced to a finite number (`0.0` when unusable).
    pub fn price_amount(&self) -> f64 {
        coerce_price(&self.price)
    }

    /// Normalized creation instant, or `None` for an invalid timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.normalize()
    }
}

// Lenient field decoders: a listing with an odd field still decodes.
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::HashMap;

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Object(map) => {
                if let Some(Value::String(oid)) = map.get("$oid") {
                    return Some(oid.clone());
                }
                Some(Value::Object(map).to_string())
            }
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?))
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        })
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Value::String(s) if !s.is_empty() => vec![s],
            _ => Vec::new(),
        })
    }

    pub fn features<'de, D: Deserializer<'de>>(d: D) -> Result<HashMap<String, bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_bool().map(|b| (k, b)))
                .collect(),
            _ => HashMap::new(),
        })
    }
}
