//! The `shade.toml` configuration file.
//!
//! ```toml
//! [inject]
//! env = "vec3"
//! "env.scale" = { type = "number", value = 2.0 }
//!
//! [glsl]
//! float_precision = "highp"
//!
//! [embree]
//! omit_header = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use shade_codegen::{EmbreeOptions, GlslOptions};
use shade_typeck::{ConstantValue, Injected, InjectionMap, SemanticType};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inject: BTreeMap<String, InjectEntry>,
    #[serde(default)]
    pub glsl: GlslOptions,
    #[serde(default)]
    pub embree: EmbreeOptions,
}

/// An `[inject]` entry: a bare type name, or a table with a type and a
/// compile-time value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InjectEntry {
    Name(String),
    Typed {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        value: Option<toml::Value>,
    },
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Config, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Build the injection map, validating every type name and value.
    pub fn injections(&self) -> Result<InjectionMap, String> {
        let mut map = InjectionMap::new();
        for (name, entry) in &self.inject {
            map.insert(name, entry.resolve(name)?);
        }
        Ok(map)
    }
}

impl InjectEntry {
    fn resolve(&self, name: &str) -> Result<Injected, String> {
        let (ty_name, value) = match self {
            InjectEntry::Name(ty) => (ty, None),
            InjectEntry::Typed { ty, value } => (ty, value.as_ref()),
        };
        let ty: SemanticType = ty_name
            .parse()
            .map_err(|e| format!("[inject] `{}`: {}", name, e))?;
        let value = match value {
            Some(v) => Some(constant(v, &ty).ok_or_else(|| {
                format!("[inject] `{}`: value {} is not a {}", name, v, ty)
            })?),
            None => None,
        };
        Ok(Injected { ty, value })
    }
}

fn constant(value: &toml::Value, ty: &SemanticType) -> Option<ConstantValue> {
    match (value, ty) {
        (toml::Value::Integer(n), SemanticType::Int | SemanticType::Number) => {
            Some(ConstantValue::Number(*n as f64))
        }
        (toml::Value::Float(n), SemanticType::Number) => Some(ConstantValue::Number(*n)),
        (toml::Value::Boolean(b), SemanticType::Boolean) => Some(ConstantValue::Bool(*b)),
        (toml::Value::String(s), SemanticType::String) => Some(ConstantValue::String(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_typeck::ObjectKind;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[inject]
env = "vec3"
"env.frequency" = "number"
"env.scale" = { type = "number", value = 2.0 }
"env.count" = { type = "int", value = 4 }

[glsl]
float_precision = "highp"

[embree]
omit_header = true
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.glsl.float_precision, "highp");
        assert!(!config.glsl.omit_header);
        assert!(config.embree.omit_header);

        let map = config.injections().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(
            map.get("env").map(|i| &i.ty),
            Some(&SemanticType::Object(ObjectKind::Float3))
        );
        assert_eq!(
            map.get("env.scale"),
            Some(&Injected {
                ty: SemanticType::Number,
                value: Some(ConstantValue::Number(2.0)),
            })
        );
        assert_eq!(
            map.get("env.count").and_then(|i| i.value.clone()),
            Some(ConstantValue::Number(4.0))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert!(config.inject.is_empty());
        assert_eq!(config.glsl, GlslOptions::default());
        assert_eq!(config.embree, EmbreeOptions::default());
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let config = Config::from_str("[inject]\nenv = \"texture\"\n").unwrap();
        let err = config.injections().unwrap_err();
        assert!(err.contains("`env`"), "got: {}", err);
        assert!(err.contains("texture"), "got: {}", err);
    }

    #[test]
    fn value_must_match_type() {
        let config =
            Config::from_str("[inject]\nflag = { type = \"bool\", value = 1.5 }\n").unwrap();
        let err = config.injections().unwrap_err();
        assert_eq!(err, "[inject] `flag`: value 1.5 is not a Boolean");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = Config::from_str("[inject\n").unwrap_err();
        assert!(err.starts_with("Failed to parse config"));
    }
}
