mod card;
mod category;

pub use card::*;
pub use category::*;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One group listing as returned by the generative backend.
///
/// Nothing here is verified: names, member counts and invite links are
/// whatever the model produced. Deserialization is lenient so that a
/// partially malformed record is still shown rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Free text; not constrained to [`Category`].
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub member_count: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub invite_link: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub language: Option<String>,
    /// The element exactly as the backend sent it, kept so output can pass
    /// it through unmodified.
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl Group {
    /// Convert one element of the backend's JSON array. Never fails: an
    /// element that is not an object becomes a blank record.
    pub fn from_value(value: Value) -> Self {
        let mut group = match serde_json::from_value::<Group>(value.clone()) {
            Ok(group) => group,
            Err(e) => {
                debug!(error = %e, "group element is not an object; keeping a blank record");
                Group::default()
            }
        };
        group.raw = Some(value);
        group
    }

    /// Backend element when there is one, otherwise the typed record.
    pub fn to_wire(&self) -> Value {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}

/// Pretty JSON array of the groups in backend form.
pub fn groups_to_json(groups: &[Group]) -> serde_json::Result<String> {
    let wire: Vec<Value> = groups.iter().map(Group::to_wire).collect();
    serde_json::to_string_pretty(&wire)
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        Value::Null => Vec::new(),
        single => scalar_to_string(single).into_iter().collect(),
    })
}
