use std::{fmt::{self, Display}, str::FromStr};

use scylla::{cql_to_rust::{FromCqlVal, FromCqlValError}, frame::response::result::{ColumnType, CqlValue}, serialize::{value::SerializeValue, writers::WrittenCellProof, CellWriter, SerializationError}};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Uuid4(Uuid);

impl Uuid4 {
    pub fn gen() -> Self {
        Uuid4(Uuid::new_v4())
    }

    pub const fn new_unchecked(uuidv4: Uuid) -> Self {
        Uuid4(uuidv4)
    }
}

impl Display for Uuid4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ParseUuid4Error {
    #[error("UUIDの形式ではありません")]
    Malformed(#[source] uuid::Error),
    #[error("UUIDのバージョンが4ではありません")]
    UnexpectedVersion,
}

impl TryFrom<Uuid> for Uuid4 {
    type Error = ParseUuid4Error;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        if value.get_version_num() == 4 {
            Ok(Uuid4(value))
        } else {
            Err(ParseUuid4Error::UnexpectedVersion)
        }
    }
}

impl FromStr for Uuid4 {
    type Err = ParseUuid4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map_err(ParseUuid4Error::Malformed)
            .and_then(Uuid4::try_from)
    }
}

impl SerializeValue for Uuid4 {
    fn serialize<'b>(&self, typ: &ColumnType, writer: CellWriter<'b>) -> Result<WrittenCellProof<'b>, SerializationError> {
        self.0.serialize(typ, writer)
    }
}

// DBに保存されているUUIDはこのサービスが生成したもののみ
impl FromCqlVal<CqlValue> for Uuid4 {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        Uuid::from_cql(cql_val).map(Uuid4::new_unchecked)
    }
}
