use std::fmt;

/// Declared type of a scalar property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Int16,
    Int32,
    Int64,
    Decimal,
    Single,
    Double,
    String,
    DateTime,
    DateTimeOffset,
    Time,
    Guid,
    Binary,
}

impl PrimitiveType {
    /// Maps a store type (already reduced to its base name, see
    /// [`db::Type::base`](crate::schema::db::Type::base)) and its numeric
    /// arguments to a primitive type.
    ///
    /// Returns `None` for store types that have no conceptual counterpart.
    pub fn from_store(base: &str, args: &[u32]) -> Option<PrimitiveType> {
        use PrimitiveType::*;

        let ty = match base {
            "NUMBER" => match args {
                [] => Decimal,
                [_, scale, ..] if *scale > 0 => Decimal,
                [1, ..] => Boolean,
                [2..=4, ..] => Int16,
                [5..=9, ..] => Int32,
                [10..=18, ..] => Int64,
                _ => Decimal,
            },
            "BOOLEAN" | "BOOL" | "BIT" => Boolean,
            "TINYINT" => Byte,
            "SMALLINT" | "INT2" => Int16,
            "INT" | "INT4" | "MEDIUMINT" => Int32,
            // SQLite integers are 64-bit
            "INTEGER" | "BIGINT" | "INT8" | "UNSIGNED BIG INT" => Int64,
            "DECIMAL" | "NUMERIC" | "MONEY" | "SMALLMONEY" => Decimal,
            "BINARY_FLOAT" => Single,
            "FLOAT" | "REAL" | "DOUBLE" | "DOUBLE PRECISION" | "BINARY_DOUBLE" => Double,
            "CHAR" | "NCHAR" | "VARCHAR" | "VARCHAR2" | "NVARCHAR" | "NVARCHAR2" | "TEXT"
            | "NTEXT" | "CLOB" | "NCLOB" | "LONG" | "CHARACTER" | "VARYING CHARACTER"
            | "NATIVE CHARACTER" | "XMLTYPE" => String,
            "DATE" | "DATETIME" | "DATETIME2" | "SMALLDATETIME" | "TIMESTAMP" => DateTime,
            "TIMESTAMP WITH TIME ZONE" | "TIMESTAMP WITH LOCAL TIME ZONE" | "DATETIMEOFFSET" => {
                DateTimeOffset
            }
            "TIME" | "INTERVAL DAY TO SECOND" => Time,
            "UUID" | "UNIQUEIDENTIFIER" => Guid,
            "RAW" if args == [16] => Guid,
            "RAW" | "LONG RAW" | "BLOB" | "BFILE" | "BINARY" | "VARBINARY" | "IMAGE" => Binary,
            _ => return None,
        };

        Some(ty)
    }

    /// True for types whose values can be absent only when declared nullable
    /// (everything except strings and byte arrays).
    pub fn is_value_type(self) -> bool {
        !matches!(self, PrimitiveType::String | PrimitiveType::Binary)
    }

    /// True for integral types
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte | PrimitiveType::Int16 | PrimitiveType::Int32 | PrimitiveType::Int64
        )
    }

    /// True for types that carry a maximum length
    pub fn has_length(self) -> bool {
        !self.is_value_type()
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
