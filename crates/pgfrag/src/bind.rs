//! Driver-facing bound values.
//!
//! Builders turn [`FieldValue`]s into [`BindValue`]s using one of two encodings:
//!
//! - [`BindValue::plain`]: arrays stay arrays (for `= ANY ($n)`), maps become
//!   JSON text.
//! - [`BindValue::json_encoded`]: arrays and maps both become JSON text, so a
//!   `json`/`jsonb` column receives the document rather than a Postgres array.
//!
//! `BindValue` implements [`ToSql`], choosing the wire encoding from the
//! parameter type Postgres inferred for the placeholder. Text is parsed into
//! numeric, boolean and timestamp parameters.

use crate::value::FieldValue;
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::error::Error;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type};

/// A value ready to be bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// JSON document text.
    Json(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<BindValue>),
}

impl BindValue {
    /// Encode a field value, keeping arrays as arrays.
    pub fn plain(value: &FieldValue) -> Self {
        match value {
            FieldValue::Undefined | FieldValue::Null => Self::Null,
            FieldValue::Bool(b) => Self::Bool(*b),
            FieldValue::Int(i) => Self::Int(*i),
            FieldValue::Float(f) => Self::Float(*f),
            FieldValue::Text(s) => Self::Text(s.clone()),
            FieldValue::Timestamp(ts) => Self::Timestamp(*ts),
            FieldValue::Array(items) => Self::Array(items.iter().map(Self::plain).collect()),
            FieldValue::Map(map) => Self::Json(map.to_json().to_string()),
        }
    }

    /// Encode a field value, turning arrays and maps into JSON text.
    pub fn json_encoded(value: &FieldValue) -> Self {
        match value {
            FieldValue::Array(_) | FieldValue::Map(_) => Self::Json(value.to_json_string()),
            other => Self::plain(other),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

type BoxError = Box<dyn Error + Sync + Send>;

fn mismatch(what: &str, ty: &Type) -> BoxError {
    format!("cannot bind {what} value to parameter of type {ty}").into()
}

/// Encode through a concrete `ToSql` impl after checking it accepts `ty`.
fn encode<T: ToSql>(
    value: T,
    what: &str,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, BoxError> {
    if !T::accepts(ty) {
        return Err(mismatch(what, ty));
    }
    value.to_sql(ty, out)
}

fn is_textual(ty: &Type) -> bool {
    <&str as ToSql>::accepts(ty)
}

fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => encode(i16::try_from(v)?, "integer", ty, out),
        Type::INT4 => encode(i32::try_from(v)?, "integer", ty, out),
        Type::INT8 => encode(v, "integer", ty, out),
        Type::FLOAT4 => encode(v as f32, "integer", ty, out),
        Type::FLOAT8 => encode(v as f64, "integer", ty, out),
        Type::NUMERIC => encode(Decimal::from(v), "integer", ty, out),
        _ if is_textual(ty) => encode(v.to_string().as_str(), "integer", ty, out),
        _ => Err(mismatch("integer", ty)),
    }
}

fn encode_float(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => encode(v as f32, "float", ty, out),
        Type::FLOAT8 => encode(v, "float", ty, out),
        Type::NUMERIC => encode(Decimal::try_from(v)?, "float", ty, out),
        _ if is_textual(ty) => encode(v.to_string().as_str(), "float", ty, out),
        _ => Err(mismatch("float", ty)),
    }
}

/// JSON text is sent verbatim; `jsonb` needs its one-byte version header.
fn encode_json_text(text: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::JSONB => {
            out.put_u8(1);
            out.put_slice(text.as_bytes());
            Ok(IsNull::No)
        }
        Type::JSON => {
            out.put_slice(text.as_bytes());
            Ok(IsNull::No)
        }
        _ if is_textual(ty) => encode(text, "json", ty, out),
        _ => Err(mismatch("json", ty)),
    }
}

fn encode_timestamp(
    ts: &DateTime<Utc>,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TIMESTAMPTZ => encode(*ts, "timestamp", ty, out),
        Type::TIMESTAMP => encode(ts.naive_utc(), "timestamp", ty, out),
        Type::DATE => encode(ts.date_naive(), "timestamp", ty, out),
        _ => Err(mismatch("timestamp", ty)),
    }
}

/// RFC 3339, then a naive date-time (read as UTC), then a bare date.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, BoxError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"));
    if let Ok(naive) = naive {
        return Ok(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Text is parsed into the parameter's type, so string filters and range
/// bounds can target numeric and timestamp columns.
fn encode_text(s: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        // Text sent to a json column is taken as the document itself.
        Type::JSON | Type::JSONB => encode_json_text(s, ty, out),
        Type::BOOL => encode(s.trim().parse::<bool>()?, "text", ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => encode_int(s.trim().parse::<i64>()?, ty, out),
        Type::FLOAT4 | Type::FLOAT8 => encode_float(s.trim().parse::<f64>()?, ty, out),
        Type::NUMERIC => encode(s.trim().parse::<Decimal>()?, "text", ty, out),
        Type::TIMESTAMPTZ | Type::TIMESTAMP | Type::DATE => {
            encode_timestamp(&parse_timestamp(s.trim())?, ty, out)
        }
        _ => encode(s, "text", ty, out),
    }
}

impl ToSql for BindValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(b) => encode(*b, "boolean", ty, out),
            Self::Int(v) => encode_int(*v, ty, out),
            Self::Float(v) => encode_float(*v, ty, out),
            Self::Text(s) => encode_text(s, ty, out),
            Self::Json(s) => encode_json_text(s, ty, out),
            Self::Timestamp(ts) => encode_timestamp(ts, ty, out),
            Self::Array(items) => {
                if !matches!(ty.kind(), Kind::Array(_)) {
                    return Err(mismatch("array", ty));
                }
                items.as_slice().to_sql(ty, out)
            }
        }
    }

    // Every type is accepted here; the concrete encoders above reject
    // mismatches with an error.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}
