use std::fmt::{self, Display};

use scylla::{cql_to_rust::{FromCqlVal, FromCqlValError}, frame::response::result::{ColumnType, CqlValue}, serialize::{value::SerializeValue, writers::WrittenCellProof, CellWriter, SerializationError}};

/// 教員名簿のキー
///
/// 存在確認にのみ使用し、資格情報としては扱わない
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn value(&self) -> &String {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SerializeValue for Username {
    fn serialize<'b>(&self, typ: &ColumnType, writer: CellWriter<'b>) -> Result<WrittenCellProof<'b>, SerializationError> {
        SerializeValue::serialize(&self.0, typ, writer)
    }
}

impl FromCqlVal<CqlValue> for Username {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        String::from_cql(cql_val).map(Username)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub username: Username,
    pub display_name: Option<String>,
}

impl From<(Username, Option<String>)> for Teacher {
    fn from((username, display_name): (Username, Option<String>)) -> Self {
        Teacher { username, display_name }
    }
}
