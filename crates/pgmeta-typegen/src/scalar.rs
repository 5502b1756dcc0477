//! Built-in scalar catalog types.

/// Scalar catalog types every backend knows how to express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `int2`
    Int16,
    /// `int4`
    Int32,
    /// `int8`
    Int64,
    /// `float4`
    Float32,
    /// `float8`
    Float64,
    /// `numeric`
    Numeric,
    /// `bytea`
    Bytes,
    /// Character types and text-encoded values (`text`, `varchar`, `inet`, `vector`, ...).
    Text,
    /// `date`
    Date,
    /// `time`, `timetz`
    Time,
    /// `timestamp`, `timestamptz`
    Timestamp,
    /// `interval`
    Interval,
    /// `uuid`
    Uuid,
    /// `json`, `jsonb`
    Json,
    /// Range and multirange types.
    Range,
    /// `void`
    Void,
    /// Anonymous `record`.
    Record,
}

impl ScalarType {
    /// Look up a catalog identifier.
    pub fn from_format(format: &str) -> Option<Self> {
        let scalar = match format {
            "bool" | "boolean" => ScalarType::Bool,
            "int2" | "smallint" => ScalarType::Int16,
            "int4" | "int" | "integer" => ScalarType::Int32,
            "int8" | "bigint" => ScalarType::Int64,
            "float4" | "real" => ScalarType::Float32,
            "float8" | "double precision" => ScalarType::Float64,
            "numeric" | "decimal" | "money" => ScalarType::Numeric,
            "bytea" => ScalarType::Bytes,
            "text" | "varchar" | "character varying" | "bpchar" | "char" | "character"
            | "citext" | "name" | "inet" | "cidr" | "macaddr" | "macaddr8" | "vector" => {
                ScalarType::Text
            }
            "date" => ScalarType::Date,
            "time" | "timetz" => ScalarType::Time,
            "timestamp" | "timestamptz" => ScalarType::Timestamp,
            "interval" => ScalarType::Interval,
            "uuid" => ScalarType::Uuid,
            "json" | "jsonb" => ScalarType::Json,
            "int4range" | "int8range" | "numrange" | "tsrange" | "tstzrange" | "daterange"
            | "int4multirange" | "int8multirange" | "nummultirange" | "tsmultirange"
            | "tstzmultirange" | "datemultirange" => ScalarType::Range,
            "void" => ScalarType::Void,
            "record" => ScalarType::Record,
            _ => return None,
        };
        Some(scalar)
    }

    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarType::Int16
                | ScalarType::Int32
                | ScalarType::Int64
                | ScalarType::Float32
                | ScalarType::Float64
                | ScalarType::Numeric
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_formats() {
        assert_eq!(ScalarType::from_format("int8"), Some(ScalarType::Int64));
        assert_eq!(ScalarType::from_format("timestamptz"), Some(ScalarType::Timestamp));
        assert_eq!(ScalarType::from_format("jsonb"), Some(ScalarType::Json));
        assert_eq!(ScalarType::from_format("tstzrange"), Some(ScalarType::Range));
        assert_eq!(ScalarType::from_format("geometry"), None);
    }

    #[test]
    fn test_classification() {
        assert!(ScalarType::Numeric.is_numeric());
        assert!(!ScalarType::Text.is_numeric());
    }
}
