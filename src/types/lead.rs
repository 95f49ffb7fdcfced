//! Lead (prospect) contact details and form-field descriptors.

use serde::{Deserialize, Deserializer, Serialize};

/// Contact details collected for a demo booking.
///
/// Deserializes from both the client request contract (camelCase) and the
/// model's tool arguments (snake_case). Empty strings are treated as absent
/// everywhere: they neither satisfy a required field nor win a merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "company_size", skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub interests: Option<Vec<String>>,
    #[serde(default, alias = "budget_range", skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

impl LeadInfo {
    /// Parse the `lead_info` object of a tool call, ignoring malformed
    /// fields rather than failing the whole object.
    pub fn from_args(value: &serde_json::Value) -> Self {
        let get = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let interests = value.get("interests").and_then(|v| match v {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(vec![s.clone()]),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        });
        Self {
            name: get("name"),
            email: get("email"),
            company: get("company"),
            phone: get("phone"),
            company_size: get("company_size").or_else(|| get("companySize")),
            interests,
            budget_range: get("budget_range").or_else(|| get("budgetRange")),
        }
    }

    /// Merge tool-call fields over client-supplied state. Call fields win
    /// whenever present; the base only fills the gaps the call left absent.
    pub fn merged(call: &LeadInfo, base: &LeadInfo) -> Self {
        fn pick(call: &Option<String>, base: &Option<String>) -> Option<String> {
            non_empty(call).or_else(|| non_empty(base))
        }
        Self {
            name: pick(&call.name, &base.name),
            email: pick(&call.email, &base.email),
            company: pick(&call.company, &base.company),
            phone: pick(&call.phone, &base.phone),
            company_size: pick(&call.company_size, &base.company_size),
            interests: call
                .interests
                .as_ref()
                .filter(|v| !v.is_empty())
                .or(base.interests.as_ref().filter(|v| !v.is_empty()))
                .cloned(),
            budget_range: pick(&call.budget_range, &base.budget_range),
        }
    }

    /// Names of the booking-required fields that are still absent.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_empty(&self.name).is_none() {
            missing.push("name");
        }
        if non_empty(&self.email).is_none() {
            missing.push("email");
        }
        if non_empty(&self.company).is_none() {
            missing.push("company");
        }
        missing
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accept `interests` as either a single string or an array of strings.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) if !s.trim().is_empty() => Some(vec![s]),
        Some(OneOrMany::Many(v)) => Some(v),
        _ => None,
    })
}

/// Descriptor for one field of the client-side lead form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
}

impl LeadField {
    fn new(name: &str, label: &str, field_type: &str, required: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type: field_type.into(),
            required,
        }
    }

    /// Descriptor for a known field name; `None` for anything the form
    /// does not know how to render.
    pub fn for_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::new("name", "Full name", "text", true)),
            "email" => Some(Self::new("email", "Work email", "email", true)),
            "company" => Some(Self::new("company", "Company", "text", true)),
            "phone" => Some(Self::new("phone", "Phone number", "tel", false)),
            "company_size" => Some(Self::new("company_size", "Company size", "select", false)),
            "interests" => Some(Self::new("interests", "What are you interested in?", "multiselect", false)),
            "budget_range" => Some(Self::new("budget_range", "Budget range", "select", false)),
            _ => None,
        }
    }
}
