use std::{fmt::{self, Display}, str::FromStr};

use scylla::{cql_to_rust::{FromCqlVal, FromCqlValError}, frame::{response::result::{ColumnType, CqlValue}, value::CqlTimestamp}, serialize::{value::SerializeValue, writers::WrittenCellProof, CellWriter, SerializationError}};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

const NANOS_PER_MILLI: i128 = 1_000_000;

/// CQLの`timestamp`と同じ精度のUNIX時刻
///
/// クライアントとはRFC3339形式の文字列でやり取りする
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UnixtimeMillis(i64);

impl UnixtimeMillis {
    pub const fn new(unixtime: i64) -> Self {
        Self(unixtime)
    }

    pub fn now() -> Self {
        Self::from(OffsetDateTime::now_utc())
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn to_rfc3339(&self) -> Result<String, FormatUnixtimeError> {
        OffsetDateTime::from_unix_timestamp_nanos(self.0 as i128 * NANOS_PER_MILLI)
            .map_err(|e| FormatUnixtimeError(e.into()))?
            .format(&Rfc3339)
            .map_err(|e| FormatUnixtimeError(e.into()))
    }
}

impl From<OffsetDateTime> for UnixtimeMillis {
    fn from(datetime: OffsetDateTime) -> Self {
        Self(datetime.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI) as i64)
    }
}

#[derive(Debug, Error)]
#[error("RFC3339形式の日時ではありません")]
pub struct ParseUnixtimeError(#[source] time::error::Parse);

impl FromStr for UnixtimeMillis {
    type Err = ParseUnixtimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339)
            .map(UnixtimeMillis::from)
            .map_err(ParseUnixtimeError)
    }
}

#[derive(Debug, Error)]
#[error("日時をRFC3339形式に変換できません")]
pub struct FormatUnixtimeError(#[source] anyhow::Error);

impl Display for UnixtimeMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "{}ms", self.0),
        }
    }
}

impl Serialize for UnixtimeMillis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self.to_rfc3339().map_err(ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for UnixtimeMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        UnixtimeMillis::from_str(&s).map_err(de::Error::custom)
    }
}

impl SerializeValue for UnixtimeMillis {
    fn serialize<'b>(&self, typ: &ColumnType, writer: CellWriter<'b>) -> Result<WrittenCellProof<'b>, SerializationError> {
        CqlTimestamp(self.0).serialize(typ, writer)
    }
}

impl FromCqlVal<CqlValue> for UnixtimeMillis {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        CqlTimestamp::from_cql(cql_val).map(|cql_timestamp| Self(cql_timestamp.0))
    }
}
