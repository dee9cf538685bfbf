//! A flat JSON message catalog standing in for the host translation service.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;

use trips::labels::Translate;

/// `key -> template` pairs. Templates interpolate `{{name}}` params.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Parse a catalog from a JSON object of string values.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the input is not a string map.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let messages = serde_json::from_str(raw)?;
        Ok(Self { messages })
    }
}

impl Translate for Catalog {
    /// Missing keys render as the key itself.
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.messages.get(key) else {
            return key.to_owned();
        };
        params
            .iter()
            .fold(template.clone(), |text, (name, value)| text.replace(&format!("{{{{{name}}}}}"), value))
    }
}
