use prism_compiler_parser::SyntaxKind;

/// Core library types the language refers to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    Object,
    ValueType,
    Enum,
    Array,
    String,
    Type,
    Delegate,
    MulticastDelegate,
    Attribute,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Nullable,
}

impl SpecialType {
    pub const ALL: [Self; 24] = [
        Self::Object,
        Self::ValueType,
        Self::Enum,
        Self::Array,
        Self::String,
        Self::Type,
        Self::Delegate,
        Self::MulticastDelegate,
        Self::Attribute,
        Self::Void,
        Self::Boolean,
        Self::Char,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::Nullable,
    ];

    pub const fn metadata_name(self) -> &'static str {
        match self {
            Self::Object => "System.Object",
            Self::ValueType => "System.ValueType",
            Self::Enum => "System.Enum",
            Self::Array => "System.Array",
            Self::String => "System.String",
            Self::Type => "System.Type",
            Self::Delegate => "System.Delegate",
            Self::MulticastDelegate => "System.MulticastDelegate",
            Self::Attribute => "System.Attribute",
            Self::Void => "System.Void",
            Self::Boolean => "System.Boolean",
            Self::Char => "System.Char",
            Self::SByte => "System.SByte",
            Self::Byte => "System.Byte",
            Self::Int16 => "System.Int16",
            Self::UInt16 => "System.UInt16",
            Self::Int32 => "System.Int32",
            Self::UInt32 => "System.UInt32",
            Self::Int64 => "System.Int64",
            Self::UInt64 => "System.UInt64",
            Self::Single => "System.Single",
            Self::Double => "System.Double",
            Self::Decimal => "System.Decimal",
            Self::Nullable => "System.Nullable`1",
        }
    }

    /// The C# keyword aliasing this type, if there is one.
    pub const fn keyword(self) -> Option<&'static str> {
        let keyword = match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Void => "void",
            Self::Boolean => "bool",
            Self::Char => "char",
            Self::SByte => "sbyte",
            Self::Byte => "byte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Single => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            _ => return None,
        };
        Some(keyword)
    }

    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let special = match kind {
            SyntaxKind::OBJECT_KW => Self::Object,
            SyntaxKind::STRING_KW => Self::String,
            SyntaxKind::VOID_KW => Self::Void,
            SyntaxKind::BOOL_KW => Self::Boolean,
            SyntaxKind::CHAR_KW => Self::Char,
            SyntaxKind::SBYTE_KW => Self::SByte,
            SyntaxKind::BYTE_KW => Self::Byte,
            SyntaxKind::SHORT_KW => Self::Int16,
            SyntaxKind::USHORT_KW => Self::UInt16,
            SyntaxKind::INT_KW => Self::Int32,
            SyntaxKind::UINT_KW => Self::UInt32,
            SyntaxKind::LONG_KW => Self::Int64,
            SyntaxKind::ULONG_KW => Self::UInt64,
            SyntaxKind::FLOAT_KW => Self::Single,
            SyntaxKind::DOUBLE_KW => Self::Double,
            SyntaxKind::DECIMAL_KW => Self::Decimal,
            _ => return None,
        };
        Some(special)
    }

    pub fn from_keyword_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.keyword() == Some(text))
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }
}
