use super::Value;

/// The shape of a [`Value`], without its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Unit,

    Bool,
    Int,
    UInt,
    Float,
    String,
    Bytes,

    // Containers.
    List,
    Map,
}

impl ValueType {
    /// Scalars are compared by exact value, containers through a comparator.
    pub fn is_scalar(&self) -> bool {
        match self {
            Self::Unit
            | Self::Bool
            | Self::Int
            | Self::UInt
            | Self::Float
            | Self::String
            | Self::Bytes => true,
            Self::List | Self::Map => false,
        }
    }

    /// Compute the value type of this value.
    pub fn for_value(value: &Value) -> Self {
        match value {
            Value::Unit => Self::Unit,
            Value::Bool(_) => Self::Bool,
            Value::UInt(_) => Self::UInt,
            Value::Int(_) => Self::Int,
            Value::Float(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Bytes(_) => Self::Bytes,
            Value::List(_) => Self::List,
            Value::Map(_) => Self::Map,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}
