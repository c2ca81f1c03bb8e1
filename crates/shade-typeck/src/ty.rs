//! Semantic types for shade shaders.
//!
//! The set is closed: numbers, integers, booleans, strings, `undefined`, the
//! built-in object kinds, and method references awaiting a call. There is no
//! user-defined type and no type variable; inference is a single forward pass.

use std::fmt;
use std::str::FromStr;

/// The built-in object subtype of an `Object` value.
///
/// The namespace kinds and `Record` only ever appear as the type of the
/// object half of a member expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Color,
    Float2,
    Float3,
    Matrix4,
    /// The `Math` global.
    MathNS,
    /// The `Shade` global (shading functions).
    ShadeNS,
    /// The `System` global (screen coordinates, time).
    SystemNS,
    /// An injected environment record whose members come from dotted
    /// injection paths (`env.frequency`).
    Record,
}

impl ObjectKind {
    /// Whether values of this kind can only be used for member resolution.
    pub fn is_namespace(self) -> bool {
        matches!(
            self,
            ObjectKind::MathNS | ObjectKind::ShadeNS | ObjectKind::SystemNS | ObjectKind::Record
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Color => "Color",
            ObjectKind::Float2 => "Float2",
            ObjectKind::Float3 => "Float3",
            ObjectKind::Matrix4 => "Matrix4",
            ObjectKind::MathNS => "Math",
            ObjectKind::ShadeNS => "Shade",
            ObjectKind::SystemNS => "System",
            ObjectKind::Record => "Record",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A method or constructor signature.
///
/// Parameters past `required` are optional (`new Color(r, g, b)` omits
/// alpha).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<SemanticType>,
    pub required: usize,
    pub ret: SemanticType,
}

impl Signature {
    pub fn new(params: Vec<SemanticType>, ret: SemanticType) -> Self {
        Signature {
            required: params.len(),
            params,
            ret,
        }
    }

    /// Mark all parameters after the first `required` as optional.
    pub fn with_required(mut self, required: usize) -> Self {
        self.required = required.min(self.params.len());
        self
    }

    pub fn accepts_arity(&self, n: usize) -> bool {
        (self.required..=self.params.len()).contains(&n)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
            if i >= self.required {
                write!(f, "?")?;
            }
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// The semantic type of an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// A floating-point number.
    Number,
    /// An integer.
    Int,
    Boolean,
    String,
    /// `undefined`; also the return type of a function without `return`.
    Undefined,
    Object(ObjectKind),
    /// A method reference awaiting a call (`Math.sin`, `color.multiply`).
    Function(Box<Signature>),
}

impl SemanticType {
    pub fn function(params: Vec<SemanticType>, ret: SemanticType) -> Self {
        SemanticType::Function(Box::new(Signature::new(params, ret)))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Number | SemanticType::Int)
    }

    pub fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            SemanticType::Object(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Numeric promotion: `Int` with `Int` stays `Int`, any other numeric
    /// pair is `Number`. `None` unless both sides are numeric.
    pub fn promote(&self, other: &SemanticType) -> Option<SemanticType> {
        match (self, other) {
            (SemanticType::Int, SemanticType::Int) => Some(SemanticType::Int),
            (a, b) if a.is_numeric() && b.is_numeric() => Some(SemanticType::Number),
            _ => None,
        }
    }

    /// Whether a value of type `found` may be passed where `self` is
    /// expected. Numeric types are mutually compatible; everything else must
    /// match exactly.
    pub fn accepts(&self, found: &SemanticType) -> bool {
        (self.is_numeric() && found.is_numeric()) || self == found
    }

    /// The common type of two branches: identical types, or numeric
    /// promotion.
    pub fn unify(&self, other: &SemanticType) -> Option<SemanticType> {
        if self == other {
            return Some(self.clone());
        }
        self.promote(other)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Number => write!(f, "Number"),
            SemanticType::Int => write!(f, "Int"),
            SemanticType::Boolean => write!(f, "Boolean"),
            SemanticType::String => write!(f, "String"),
            SemanticType::Undefined => write!(f, "Undefined"),
            SemanticType::Object(kind) => write!(f, "Object({})", kind),
            SemanticType::Function(sig) => write!(f, "{}", sig),
        }
    }
}

/// A type name that does not name a semantic type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTypeName(pub String);

impl fmt::Display for UnknownTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type name `{}`", self.0)
    }
}

impl std::error::Error for UnknownTypeName {}

/// Parses the type names used in configuration files (`"vec3"`,
/// `"number"`, `"color"`, ...). Case-insensitive.
impl FromStr for SemanticType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "number" | "float" => SemanticType::Number,
            "int" => SemanticType::Int,
            "bool" | "boolean" => SemanticType::Boolean,
            "string" => SemanticType::String,
            "undefined" | "void" => SemanticType::Undefined,
            "color" => SemanticType::Object(ObjectKind::Color),
            "vec2" | "float2" => SemanticType::Object(ObjectKind::Float2),
            "vec3" | "float3" => SemanticType::Object(ObjectKind::Float3),
            "matrix4" | "mat4" => SemanticType::Object(ObjectKind::Matrix4),
            _ => return Err(UnknownTypeName(s.to_string())),
        })
    }
}

/// A value known at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    String(String),
    Bool(bool),
}

impl ConstantValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConstantValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Numbers print in their shortest round-trip form: `5`, `0.5`, `NaN`.
impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Number(n) => write!(f, "{}", n),
            ConstantValue::String(s) => write!(f, "{}", s),
            ConstantValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_promotion_law() {
        use SemanticType::*;
        assert_eq!(Int.promote(&Int), Some(Int));
        assert_eq!(Int.promote(&Number), Some(Number));
        assert_eq!(Number.promote(&Int), Some(Number));
        assert_eq!(Number.promote(&Number), Some(Number));
        assert_eq!(Number.promote(&Boolean), None);
        assert_eq!(Object(ObjectKind::Color).promote(&Number), None);
    }

    #[test]
    fn accepts_is_lenient_only_for_numbers() {
        let color = SemanticType::Object(ObjectKind::Color);
        assert!(SemanticType::Number.accepts(&SemanticType::Int));
        assert!(SemanticType::Int.accepts(&SemanticType::Number));
        assert!(color.accepts(&color));
        assert!(!color.accepts(&SemanticType::Object(ObjectKind::Float3)));
        assert!(!SemanticType::Boolean.accepts(&SemanticType::Number));
    }

    #[test]
    fn parse_config_type_names() {
        assert_eq!("vec3".parse::<SemanticType>(), Ok(SemanticType::Object(ObjectKind::Float3)));
        assert_eq!("Number".parse::<SemanticType>(), Ok(SemanticType::Number));
        assert_eq!("COLOR".parse::<SemanticType>(), Ok(SemanticType::Object(ObjectKind::Color)));
        assert_eq!(
            "texture".parse::<SemanticType>(),
            Err(UnknownTypeName("texture".into()))
        );
    }

    #[test]
    fn display_signature_marks_optional_params() {
        let sig = Signature::new(
            vec![
                SemanticType::Object(ObjectKind::Float3),
                SemanticType::Object(ObjectKind::Color),
            ],
            SemanticType::Object(ObjectKind::Color),
        )
        .with_required(1);
        assert_eq!(
            sig.to_string(),
            "(Object(Float3), Object(Color)?) -> Object(Color)"
        );
        assert!(sig.accepts_arity(1));
        assert!(sig.accepts_arity(2));
        assert!(!sig.accepts_arity(3));
    }

    #[test]
    fn constants_print_in_host_form() {
        assert_eq!(ConstantValue::Number(5.0).to_string(), "5");
        assert_eq!(ConstantValue::Number(0.25).to_string(), "0.25");
        assert_eq!(ConstantValue::Number(f64::NAN).to_string(), "NaN");
    }
}
