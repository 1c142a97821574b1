use scylla::{cql_to_rust::{FromCqlVal, FromCqlValError}, frame::response::result::{ColumnType, CqlValue}, serialize::{value::SerializeValue, writers::WrittenCellProof, CellWriter, SerializationError}};
use serde::{Deserialize, Serialize};

// 空文字列も受け入れる
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementMessage(String);

impl AnnouncementMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl SerializeValue for AnnouncementMessage {
    fn serialize<'b>(&self, typ: &ColumnType, writer: CellWriter<'b>) -> Result<WrittenCellProof<'b>, SerializationError> {
        SerializeValue::serialize(&self.0, typ, writer)
    }
}

impl FromCqlVal<CqlValue> for AnnouncementMessage {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        String::from_cql(cql_val).map(AnnouncementMessage)
    }
}
