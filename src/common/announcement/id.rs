use std::{fmt::{self, Display}, str::FromStr};

use scylla::{cql_to_rust::{FromCqlVal, FromCqlValError}, frame::response::result::{ColumnType, CqlValue}, serialize::{value::SerializeValue, writers::WrittenCellProof, CellWriter, SerializationError}};
use serde::{Serialize, Serializer};

use crate::common::uuid::uuid4::{ParseUuid4Error, Uuid4};

/// お知らせの作成時に割り当てられる識別子
///
/// 外部には文字列として公開する
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnnouncementId(Uuid4);

impl AnnouncementId {
    pub fn gen() -> Self {
        AnnouncementId(Uuid4::gen())
    }
}

impl Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnnouncementId {
    type Err = ParseUuid4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid4::from_str(s).map(AnnouncementId)
    }
}

impl Serialize for AnnouncementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl SerializeValue for AnnouncementId {
    fn serialize<'b>(&self, typ: &ColumnType, writer: CellWriter<'b>) -> Result<WrittenCellProof<'b>, SerializationError> {
        SerializeValue::serialize(&self.0, typ, writer)
    }
}

impl FromCqlVal<CqlValue> for AnnouncementId {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        Uuid4::from_cql(cql_val).map(AnnouncementId)
    }
}
