//! The catalogue of built-in shader object types.
//!
//! Each entry names one object kind (`Color`, `Vec3`, the `Math` namespace,
//! ...) and lists its fields, methods and constructor. A [`Registry`] is an
//! ordinary immutable value: build it once with [`Registry::builtin`] and
//! share it by reference between any number of compilations.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::ty::{ObjectKind, SemanticType, Signature};

/// The type of one member of a registry entry.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberSignature {
    Field(SemanticType),
    Method(Signature),
}

impl MemberSignature {
    /// The type a member expression naming this member has.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            MemberSignature::Field(ty) => ty.clone(),
            MemberSignature::Method(sig) => SemanticType::Function(Box::new(sig.clone())),
        }
    }
}

/// How `new Name(...)` may be used.
#[derive(Clone, Debug, PartialEq)]
pub enum Constructor {
    /// Namespaces cannot be instantiated.
    None,
    /// Any arguments are accepted unchecked.
    Untyped,
    Typed(Signature),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegistryEntry {
    pub name: String,
    pub kind: ObjectKind,
    pub constructor: Constructor,
    pub members: FxHashMap<String, MemberSignature>,
}

impl RegistryEntry {
    pub fn new(name: impl Into<String>, kind: ObjectKind, constructor: Constructor) -> Self {
        RegistryEntry {
            name: name.into(),
            kind,
            constructor,
            members: FxHashMap::default(),
        }
    }

    pub fn field(mut self, name: &str, ty: SemanticType) -> Self {
        self.members
            .insert(name.to_string(), MemberSignature::Field(ty));
        self
    }

    pub fn method(mut self, name: &str, sig: Signature) -> Self {
        self.members
            .insert(name.to_string(), MemberSignature::Method(sig));
        self
    }

    pub fn member(&self, name: &str) -> Option<&MemberSignature> {
        self.members.get(name)
    }
}

/// Two catalogue entries claim the same name or the same kind.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    DuplicateName(String),
    DuplicateKind {
        kind: ObjectKind,
        first: String,
        second: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => {
                write!(f, "registry entry `{}` is defined twice", name)
            }
            RegistryError::DuplicateKind {
                kind,
                first,
                second,
            } => write!(
                f,
                "registry entries `{}` and `{}` both claim kind `{}`",
                first, second, kind
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Built-in object types keyed uniquely by name and by kind.
#[derive(Clone, Debug)]
pub struct Registry {
    by_name: FxHashMap<String, RegistryEntry>,
    by_kind: FxHashMap<ObjectKind, String>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names or kinds.
    pub fn new(entries: impl IntoIterator<Item = RegistryEntry>) -> Result<Self, RegistryError> {
        let mut by_name = FxHashMap::default();
        let mut by_kind: FxHashMap<ObjectKind, String> = FxHashMap::default();
        for entry in entries {
            if by_name.contains_key(&entry.name) {
                return Err(RegistryError::DuplicateName(entry.name));
            }
            if let Some(first) = by_kind.get(&entry.kind) {
                return Err(RegistryError::DuplicateKind {
                    kind: entry.kind,
                    first: first.clone(),
                    second: entry.name,
                });
            }
            by_kind.insert(entry.kind, entry.name.clone());
            by_name.insert(entry.name.clone(), entry);
        }
        Ok(Registry { by_name, by_kind })
    }

    /// The shader-domain catalogue: `Color`, `Vec2`, `Vec3`, `Matrix4`,
    /// `Math`, `Shade`, `System`.
    pub fn builtin() -> Self {
        Registry::new(builtin_entries()).expect("built-in catalogue has unique names and kinds")
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(name)
    }

    pub fn lookup_by_kind(&self, kind: ObjectKind) -> Option<&RegistryEntry> {
        self.by_kind
            .get(&kind)
            .and_then(|name| self.by_name.get(name))
    }

    /// The type of a global identifier naming a namespace entry (`Math`).
    /// Constructible entries are not values on their own.
    pub fn global(&self, name: &str) -> Option<SemanticType> {
        self.lookup_by_name(name)
            .filter(|entry| entry.kind.is_namespace())
            .map(|entry| SemanticType::Object(entry.kind))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Built-in catalogue ─────────────────────────────────────────────────

fn builtin_entries() -> Vec<RegistryEntry> {
    use SemanticType::Number;

    let color = SemanticType::Object(ObjectKind::Color);
    let float2 = SemanticType::Object(ObjectKind::Float2);
    let float3 = SemanticType::Object(ObjectKind::Float3);
    let matrix = SemanticType::Object(ObjectKind::Matrix4);

    let unary = || Signature::new(vec![Number], Number);
    let binary = || Signature::new(vec![Number, Number], Number);

    let color_entry = RegistryEntry::new(
        "Color",
        ObjectKind::Color,
        Constructor::Typed(Signature::new(vec![Number; 4], color.clone()).with_required(3)),
    )
    .field("r", Number)
    .field("g", Number)
    .field("b", Number)
    .field("a", Number)
    .method("add", Signature::new(vec![color.clone()], color.clone()))
    .method("subtract", Signature::new(vec![color.clone()], color.clone()))
    .method("multiply", Signature::new(vec![color.clone()], color.clone()))
    .method("scale", Signature::new(vec![Number], color.clone()));

    let vec2 = RegistryEntry::new(
        "Vec2",
        ObjectKind::Float2,
        Constructor::Typed(Signature::new(vec![Number; 2], float2.clone())),
    )
    .field("x", Number)
    .field("y", Number)
    .method("length", Signature::new(vec![], Number))
    .method("dot", Signature::new(vec![float2.clone()], Number))
    .method("normalize", Signature::new(vec![], float2.clone()))
    .method("add", Signature::new(vec![float2.clone()], float2.clone()))
    .method("subtract", Signature::new(vec![float2.clone()], float2.clone()))
    .method("multiply", Signature::new(vec![float2.clone()], float2.clone()));

    let vec3 = RegistryEntry::new(
        "Vec3",
        ObjectKind::Float3,
        Constructor::Typed(Signature::new(vec![Number; 3], float3.clone())),
    )
    .field("x", Number)
    .field("y", Number)
    .field("z", Number)
    .method("length", Signature::new(vec![], Number))
    .method("dot", Signature::new(vec![float3.clone()], Number))
    .method("cross", Signature::new(vec![float3.clone()], float3.clone()))
    .method("normalize", Signature::new(vec![], float3.clone()))
    .method("add", Signature::new(vec![float3.clone()], float3.clone()))
    .method("subtract", Signature::new(vec![float3.clone()], float3.clone()))
    .method("multiply", Signature::new(vec![float3.clone()], float3.clone()));

    let matrix4 = RegistryEntry::new("Matrix4", ObjectKind::Matrix4, Constructor::Untyped)
        .method("transformPoint", Signature::new(vec![float3.clone()], float3.clone()))
        .method("transformDirection", Signature::new(vec![float3.clone()], float3.clone()))
        .method("multiply", Signature::new(vec![matrix.clone()], matrix.clone()))
        .method("transpose", Signature::new(vec![], matrix.clone()))
        .method("inverse", Signature::new(vec![], matrix));

    let mut math = RegistryEntry::new("Math", ObjectKind::MathNS, Constructor::None);
    for constant in ["PI", "E", "LN2", "LN10", "SQRT2"] {
        math = math.field(constant, Number);
    }
    for name in [
        "abs", "acos", "asin", "atan", "ceil", "cos", "exp", "floor", "log", "round", "sin",
        "sqrt", "tan",
    ] {
        math = math.method(name, unary());
    }
    for name in ["atan2", "max", "min", "pow"] {
        math = math.method(name, binary());
    }
    let math = math
        .method("clamp", Signature::new(vec![Number; 3], Number))
        .method("random", Signature::new(vec![], Number));

    let shade = RegistryEntry::new("Shade", ObjectKind::ShadeNS, Constructor::None)
        .method(
            "diffuse",
            Signature::new(vec![float3.clone(), color.clone()], color.clone()).with_required(1),
        )
        .method("phong", Signature::new(vec![float3.clone(), Number], color))
        .method("normalize", Signature::new(vec![float3.clone()], float3.clone()))
        .method(
            "transform",
            Signature::new(vec![SemanticType::String, float3.clone()], float3.clone()),
        )
        .method(
            "reflect",
            Signature::new(vec![float3.clone(), float3.clone()], float3.clone()),
        );

    let system = RegistryEntry::new("System", ObjectKind::SystemNS, Constructor::None)
        .field("coords", float3)
        .field("width", Number)
        .field("height", Number)
        .field("time", Number);

    vec![color_entry, vec2, vec3, matrix4, math, shade, system]
}
