use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactField {
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone_numbers: Option<Vec<ContactField>>,
}

impl Contact {
    pub fn has_number(&self, phone_number: &str) -> bool {
        self.phone_numbers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|field| field.value.contains(phone_number))
    }
}

/// Query handed to the contacts capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub fields: Vec<String>,
    pub filter: String,
    pub multiple: bool,
}

impl ContactQuery {
    pub fn by_number(phone_number: &str) -> Self {
        Self {
            fields: vec!["displayName".into(), "phoneNumbers".into()],
            filter: phone_number.to_string(),
            multiple: true,
        }
    }
}
