//! SQL value types fed to literal rendering.
//!
//! Values are dialect-neutral. The column's [`TypeSpec`](super::TypeSpec)
//! decides how a value is spelled; the value itself only carries data.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{BoxError, Result, XlateError};

use super::datetime::DateTime;
use super::interval::Interval;
use super::typespec::TypeKind;

/// Whether a large object holds bytes or characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LobKind {
    Binary,
    Character,
}

type Loader = dyn Fn() -> std::result::Result<Vec<u8>, BoxError> + Send + Sync;

struct LobCell {
    kind: LobKind,
    loader: Box<Loader>,
    loaded: OnceLock<std::result::Result<Vec<u8>, String>>,
}

/// Deferred large-object content.
///
/// The loader runs at most once; every clone shares the cached outcome,
/// including a failed one.
#[derive(Clone)]
pub struct LazyLob {
    cell: Arc<LobCell>,
}

impl LazyLob {
    pub fn new<F>(kind: LobKind, loader: F) -> Self
    where
        F: Fn() -> std::result::Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(LobCell {
                kind,
                loader: Box::new(loader),
                loaded: OnceLock::new(),
            }),
        }
    }

    /// Binary LOB backed by a loader.
    pub fn binary<F>(loader: F) -> Self
    where
        F: Fn() -> std::result::Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        Self::new(LobKind::Binary, loader)
    }

    /// Character LOB backed by a loader returning UTF-8 bytes.
    pub fn character<F>(loader: F) -> Self
    where
        F: Fn() -> std::result::Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        Self::new(LobKind::Character, loader)
    }

    /// Already-materialized content.
    pub fn ready(kind: LobKind, content: Vec<u8>) -> Self {
        let lob = Self::new(kind, || Ok(Vec::new()));
        let _ = lob.cell.loaded.set(Ok(content));
        lob
    }

    pub fn kind(&self) -> LobKind {
        self.cell.kind
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.loaded.get().is_some()
    }

    /// Materialize the content, running the loader on first use only.
    pub fn bytes(&self) -> Result<&[u8]> {
        let outcome = self.cell.loaded.get_or_init(|| {
            debug!("Materializing {:?} large object", self.cell.kind);
            (self.cell.loader)().map_err(|e| e.to_string())
        });
        match outcome {
            Ok(bytes) => Ok(bytes.as_slice()),
            Err(msg) => Err(XlateError::LobLoad(msg.clone())),
        }
    }

    /// Content as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> Result<Cow<'_, str>> {
        Ok(String::from_utf8_lossy(self.bytes()?))
    }
}

impl PartialEq for LazyLob {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl std::fmt::Debug for LazyLob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyLob")
            .field("kind", &self.cell.kind)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// SQL value enum with `Cow` payloads for borrowed text and bytes.
///
/// # Lifetime
///
/// The `'a` lifetime allows borrowing from caller buffers. Use
/// [`into_owned`](SqlValue::into_owned) to detach.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use dbxlate::core::SqlValue;
///
/// let borrowed: SqlValue<'_> = SqlValue::Text(Cow::Borrowed("hello"));
/// let owned: SqlValue<'static> = borrowed.into_owned();
/// assert!(!owned.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    /// Large object loaded on demand.
    Lob(LazyLob),
    Uuid(Uuid),
    Date(NaiveDate),
    /// Time of day without zone; zoned times travel as [`SqlValue::DateTime`].
    Time(NaiveTime),
    DateTime(DateTime),
    Interval(Interval),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null => SqlValue::Null,
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::I16(v) => SqlValue::I16(v),
            SqlValue::I32(v) => SqlValue::I32(v),
            SqlValue::I64(v) => SqlValue::I64(v),
            SqlValue::F32(v) => SqlValue::F32(v),
            SqlValue::F64(v) => SqlValue::F64(v),
            SqlValue::Decimal(v) => SqlValue::Decimal(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
            SqlValue::Bytes(v) => SqlValue::Bytes(Cow::Owned(v.into_owned())),
            SqlValue::Lob(v) => SqlValue::Lob(v),
            SqlValue::Uuid(v) => SqlValue::Uuid(v),
            SqlValue::Date(v) => SqlValue::Date(v),
            SqlValue::Time(v) => SqlValue::Time(v),
            SqlValue::DateTime(v) => SqlValue::DateTime(v),
            SqlValue::Interval(v) => SqlValue::Interval(v),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Short variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::I16(_) => "i16",
            SqlValue::I32(_) => "i32",
            SqlValue::I64(_) => "i64",
            SqlValue::F32(_) => "f32",
            SqlValue::F64(_) => "f64",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Lob(_) => "lob",
            SqlValue::Uuid(_) => "uuid",
            SqlValue::Date(_) => "date",
            SqlValue::Time(_) => "time",
            SqlValue::DateTime(_) => "datetime",
            SqlValue::Interval(_) => "interval",
        }
    }

    /// Read a JSON document value as a value of a column kind.
    ///
    /// Binary values are hex strings, temporal values ISO-like text,
    /// intervals either `Y-M` / `D HH:MM:SS.f` text, a bare number (months
    /// for year-month, nanoseconds otherwise) or `{"months": .., "nanos": ..}`.
    pub fn from_json(kind: TypeKind, json: &serde_json::Value) -> Result<SqlValue<'static>> {
        use serde_json::Value as J;

        if json.is_null() {
            return Ok(SqlValue::Null);
        }
        let bad = |what: &str| XlateError::value(kind, format!("expected {}, got {}", what, json));

        let value = match kind {
            TypeKind::Fixed => match json {
                J::Bool(b) => SqlValue::Bool(*b),
                J::Number(n) => match n.as_i64() {
                    Some(i) => SqlValue::I64(i),
                    None => SqlValue::Decimal(parse_decimal(kind, &n.to_string())?),
                },
                J::String(s) => SqlValue::Decimal(parse_decimal(kind, s)?),
                _ => return Err(bad("a number")),
            },
            TypeKind::Float => match json {
                J::Number(n) => SqlValue::F64(n.as_f64().ok_or_else(|| bad("a number"))?),
                J::String(s) => match s.as_str() {
                    "NaN" => SqlValue::F64(f64::NAN),
                    "Infinity" | "+Infinity" => SqlValue::F64(f64::INFINITY),
                    "-Infinity" => SqlValue::F64(f64::NEG_INFINITY),
                    other => SqlValue::F64(other.trim().parse().map_err(|_| bad("a float"))?),
                },
                _ => return Err(bad("a number")),
            },
            k if k.is_binary() => match json {
                J::String(s) => {
                    let digits = s.strip_prefix("0x").unwrap_or(s);
                    let bytes = hex::decode(digits)
                        .map_err(|e| XlateError::value(kind, format!("bad hex: {}", e)))?;
                    if k.is_long() {
                        SqlValue::Lob(LazyLob::ready(LobKind::Binary, bytes))
                    } else {
                        SqlValue::Bytes(Cow::Owned(bytes))
                    }
                }
                _ => return Err(bad("a hex string")),
            },
            k if k.is_character() => match json {
                J::String(s) => SqlValue::Text(Cow::Owned(s.clone())),
                J::Number(n) => SqlValue::Text(Cow::Owned(n.to_string())),
                J::Bool(b) => SqlValue::Text(Cow::Owned(b.to_string())),
                _ => return Err(bad("a string")),
            },
            TypeKind::Date => {
                let s = json.as_str().ok_or_else(|| bad("a date string"))?;
                let dt = DateTime::parse(s).ok_or_else(|| bad("YYYY-MM-DD"))?;
                SqlValue::Date(dt.date())
            }
            TypeKind::Time => {
                let s = json.as_str().ok_or_else(|| bad("a time string"))?;
                let t = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")
                    .map_err(|_| bad("HH:MM:SS[.f]"))?;
                SqlValue::Time(t)
            }
            TypeKind::TimeTz => {
                let s = json.as_str().ok_or_else(|| bad("a time string"))?;
                let dt = DateTime::parse(&format!("1970-01-01 {}", s.trim()))
                    .ok_or_else(|| bad("HH:MM:SS[.f][+HH:MM]"))?;
                SqlValue::DateTime(dt)
            }
            TypeKind::Timestamp | TypeKind::TimestampTz => {
                let s = json.as_str().ok_or_else(|| bad("a timestamp string"))?;
                SqlValue::DateTime(DateTime::parse(s).ok_or_else(|| bad("an ISO timestamp"))?)
            }
            TypeKind::IntervalYm | TypeKind::IntervalDs | TypeKind::IntervalYs => {
                SqlValue::Interval(interval_from_json(kind, json).ok_or_else(|| bad("an interval"))?)
            }
            _ => match json {
                J::Bool(b) => SqlValue::Bool(*b),
                J::Number(n) => match n.as_i64() {
                    Some(i) => SqlValue::I64(i),
                    None => SqlValue::F64(n.as_f64().ok_or_else(|| bad("a number"))?),
                },
                J::String(s) => SqlValue::Text(Cow::Owned(s.clone())),
                _ => SqlValue::Text(Cow::Owned(json.to_string())),
            },
        };
        Ok(value)
    }
}

fn parse_decimal(kind: TypeKind, text: &str) -> Result<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| XlateError::value(kind, format!("'{}' is not a decimal: {}", text, e)))
}

fn interval_from_json(kind: TypeKind, json: &serde_json::Value) -> Option<Interval> {
    use serde_json::Value as J;

    match json {
        J::Number(n) => {
            let n = n.as_i64()?;
            Some(match kind {
                TypeKind::IntervalYm => Interval::from_months(n),
                _ => Interval::from_nanos(n),
            })
        }
        J::Object(map) => {
            let months = map.get("months").and_then(J::as_i64).unwrap_or(0);
            let nanos = map.get("nanos").and_then(J::as_i64).unwrap_or(0);
            Some(Interval::new(months, nanos))
        }
        J::String(s) => match kind {
            TypeKind::IntervalYm => Interval::parse_year_month(s),
            TypeKind::IntervalDs => Interval::parse_day_second(s),
            _ => {
                // "Y-M D HH:MM:SS.f", either half optional
                let s = s.trim();
                if let Some(iv) = Interval::parse_day_second(s) {
                    return Some(iv);
                }
                if let Some(iv) = Interval::parse_year_month(s) {
                    return Some(iv);
                }
                let (ym, ds) = s.split_once(' ')?;
                let ym = Interval::parse_year_month(ym)?;
                let ds = Interval::parse_day_second(ds)?;
                Some(Interval::new(ym.months, ds.nanos))
            }
        },
        _ => None,
    }
}

impl From<bool> for SqlValue<'static> {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue<'static> {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}

impl From<i32> for SqlValue<'static> {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue<'static> {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f64> for SqlValue<'static> {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<Decimal> for SqlValue<'static> {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue<'static> {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for SqlValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        SqlValue::Bytes(Cow::Borrowed(v))
    }
}

impl From<Uuid> for SqlValue<'static> {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<NaiveDate> for SqlValue<'static> {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<DateTime> for SqlValue<'static> {
    fn from(v: DateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<Interval> for SqlValue<'static> {
    fn from(v: Interval) -> Self {
        SqlValue::Interval(v)
    }
}

impl From<LazyLob> for SqlValue<'static> {
    fn from(v: LazyLob) -> Self {
        SqlValue::Lob(v)
    }
}
