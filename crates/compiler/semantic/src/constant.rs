//! Typed constants: literal attribute arguments, enum member values and `const`
//! field values, each tagged with the type it was converted to.

use smol_str::SmolStr;

use crate::symbols::SymbolRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedConstantKind {
    Primitive,
    Enum,
    Type,
    Array,
    Error,
}

/// The runtime value of a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    String(SmolStr),
    Type(SymbolRef),
    Array(Vec<TypedConstant>),
}

impl ConstantValue {
    /// Widens any integral value.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::I32(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            Self::Char(c) => Some(u32::from(c).into()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            _ => self.as_i128().map(|v| v as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedConstant {
    pub kind: TypedConstantKind,
    /// The constant's type; `None` for an untyped `null`.
    pub ty: Option<SymbolRef>,
    pub value: ConstantValue,
}

impl TypedConstant {
    pub fn new(kind: TypedConstantKind, ty: Option<SymbolRef>, value: ConstantValue) -> Self {
        Self { kind, ty, value }
    }

    pub fn error() -> Self {
        Self::new(TypedConstantKind::Error, None, ConstantValue::Null)
    }

    pub fn is_error(&self) -> bool {
        self.kind == TypedConstantKind::Error
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, ConstantValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&SymbolRef> {
        match &self.value {
            ConstantValue::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Elements of an array constant. A `null` array has none.
    pub fn values(&self) -> Option<&[TypedConstant]> {
        match &self.value {
            ConstantValue::Array(values) => Some(values),
            _ => None,
        }
    }
}

/// Integer literal value and the suffix-implied candidate types, before the natural
/// type is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntLiteral {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
}

pub(crate) fn parse_int_literal(text: &str) -> Result<IntLiteral, String> {
    let lower = text.replace('_', "").to_ascii_lowercase();
    let (digits, unsigned, long) = if let Some(d) = lower
        .strip_suffix("ul")
        .or_else(|| lower.strip_suffix("lu"))
    {
        (d, true, true)
    } else if let Some(d) = lower.strip_suffix('u') {
        (d, true, false)
    } else if let Some(d) = lower.strip_suffix('l') {
        (d, false, true)
    } else {
        (lower.as_str(), false, false)
    };

    let value = match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| format!("Integral constant '{text}' is too large"))?;

    let literal = match (unsigned, long) {
        (false, false) if value <= i32::MAX as u64 => IntLiteral::I32(value as i32),
        (_, false) if value <= u32::MAX as u64 => IntLiteral::U32(value as u32),
        (false, _) if value <= i64::MAX as u64 => IntLiteral::I64(value as i64),
        _ => IntLiteral::U64(value),
    };
    Ok(literal)
}

/// Real literal suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RealSuffix {
    Float,
    Double,
    Decimal,
}

pub(crate) fn parse_real_literal(text: &str) -> Result<(f64, RealSuffix), String> {
    let lower = text.replace('_', "").to_ascii_lowercase();
    let (digits, suffix) = match lower.chars().last() {
        Some('f') => (&lower[..lower.len() - 1], RealSuffix::Float),
        Some('d') => (&lower[..lower.len() - 1], RealSuffix::Double),
        Some('m') => (&lower[..lower.len() - 1], RealSuffix::Decimal),
        _ => (lower.as_str(), RealSuffix::Double),
    };
    let value = digits
        .parse::<f64>()
        .map_err(|_| format!("Invalid real literal '{text}'"))?;
    Ok((value, suffix))
}

/// Contents of a string literal token, regular or verbatim.
pub(crate) fn unquote_string(text: &str) -> Result<String, String> {
    if let Some(verbatim) = text.strip_prefix("@\"") {
        let body = verbatim.strip_suffix('"').unwrap_or(verbatim);
        return Ok(body.replace("\"\"", "\""));
    }
    let body = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    unescape(body)
}

pub(crate) fn unquote_char(text: &str) -> Result<char, String> {
    let body = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    let unescaped = unescape(body)?;
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("Too many characters in character literal {text}")),
    }
}

fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('a') => '\u{7}',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('v') => '\u{b}',
            Some(c @ ('\\' | '\'' | '"')) => c,
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("Invalid escape sequence \\u{hex}"))?
            }
            Some(other) => return Err(format!("Unrecognized escape sequence \\{other}")),
            None => return Err("Unterminated escape sequence".to_string()),
        };
        out.push(escaped);
    }
    Ok(out)
}
