//! Per-node and per-function inference results.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ty::{ConstantValue, SemanticType};

/// The semantic type of one syntax node, plus its value when it is known at
/// compile time.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub ty: SemanticType,
    pub static_value: Option<ConstantValue>,
}

impl Annotation {
    pub fn new(ty: SemanticType) -> Self {
        Annotation {
            ty,
            static_value: None,
        }
    }

    pub fn constant(ty: SemanticType, value: ConstantValue) -> Self {
        Annotation {
            ty,
            static_value: Some(value),
        }
    }

    /// The static value as a number, if it is one.
    pub fn static_number(&self) -> Option<f64> {
        self.static_value.as_ref().and_then(ConstantValue::as_number)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.static_value {
            Some(value) => write!(f, "{} = {}", self.ty, value),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// The signature inference derived for a shader function.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionAnnotation {
    pub name: String,
    /// Parameters in declaration order with the types they were injected as.
    pub params: Vec<(String, SemanticType)>,
    /// The unified type of every reachable `return`.
    pub return_type: SemanticType,
}

impl fmt::Display for FunctionAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, ty)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, ty)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// Types serialize as their display form (`"Object(Float3)"`).
impl Serialize for SemanticType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::ObjectKind;

    #[test]
    fn function_annotation_display() {
        let annotation = FunctionAnnotation {
            name: "shade".into(),
            params: vec![("env".into(), SemanticType::Object(ObjectKind::Float3))],
            return_type: SemanticType::Number,
        };
        assert_eq!(annotation.to_string(), "shade(env: Object(Float3)) -> Number");
        assert_eq!(
            serde_json::to_string(&annotation).unwrap(),
            r#"{"name":"shade","params":[["env","Object(Float3)"]],"return_type":"Number"}"#
        );
    }

    #[test]
    fn annotation_display_includes_static_value() {
        let annotation = Annotation::constant(SemanticType::Int, ConstantValue::Number(3.0));
        assert_eq!(annotation.to_string(), "Int = 3");
        assert_eq!(annotation.static_number(), Some(3.0));
        assert_eq!(Annotation::new(SemanticType::Boolean).to_string(), "Boolean");
    }
}
