//! Symbol dump model, as exported by `lua-language-server --doc`.
//!
//! Only the members the reference needs are modelled. Everything except the
//! symbol name is optional so partially shaped records still load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Define-kind of an `---@enum` declaration.
pub const KIND_ENUM: &str = "doc.enum";
/// Define-kind of a plain table member; rendered under its owner.
pub const KIND_TABLE_FIELD: &str = "tablefield";

/// A top-level symbol: class, enum, function holder or global.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extends: Option<DocExtends>,
    #[serde(default)]
    pub defines: Vec<DocDefine>,
    #[serde(default)]
    pub fields: Vec<DocField>,
}

/// A declaration site of a symbol.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocDefine {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// File URI of the defining source
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extends: Option<DocExtends>,
}

/// A member listed under its owning symbol.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extends: Option<DocExtends>,
}

/// Type information attached to a define or field. Source positions and
/// the type kind are not modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocExtends {
    /// Rendered signature, e.g. `function LibHistoire:Foo(a: string)`
    #[serde(default)]
    pub view: Option<String>,
}

impl DocEntry {
    /// Kind of the first declaration site, if any.
    pub fn primary_kind(&self) -> Option<&str> {
        self.defines.first().map(|define| define.kind.as_str())
    }

    pub fn is_enum(&self) -> bool {
        self.primary_kind() == Some(KIND_ENUM)
    }

    pub fn is_table_field(&self) -> bool {
        self.primary_kind() == Some(KIND_TABLE_FIELD)
    }

    /// The entry viewed as a member of another symbol. Description and
    /// signature fall back to the first declaration site.
    pub fn to_field(&self) -> DocField {
        let primary = self.defines.first();
        DocField {
            name: self.name.clone(),
            kind: self.kind.clone(),
            desc: self
                .desc
                .clone()
                .or_else(|| primary.and_then(|define| define.desc.clone())),
            extends: self
                .extends
                .clone()
                .or_else(|| primary.and_then(|define| define.extends.clone())),
        }
    }
}

impl DocField {
    /// Signature view text, if present and non-empty.
    pub fn view(&self) -> Option<&str> {
        self.extends
            .as_ref()
            .and_then(|extends| extends.view.as_deref())
            .filter(|view| !view.is_empty())
    }
}

/// Accept any JSON for an optional member and keep it only when it has the
/// expected shape. Class defines list their parents as an array under
/// `extends`, which is not a signature.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
