//! Field visibility for JSON reads.

use serde_json::Value as JsonValue;

/// Which fields survive when a row is rendered as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldVisibility {
    visible: Option<Vec<String>>,
    hidden: Vec<String>,
}

impl FieldVisibility {
    /// Only these fields are kept.
    pub fn set_visible<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible = Some(fields.into_iter().map(Into::into).collect());
    }

    /// These fields are removed.
    pub fn set_hidden<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden = fields.into_iter().map(Into::into).collect();
    }

    pub fn is_unrestricted(&self) -> bool {
        self.visible.is_none() && self.hidden.is_empty()
    }

    /// Strip fields from a JSON object; other values pass through.
    pub fn apply(&self, mut row: JsonValue) -> JsonValue {
        if let JsonValue::Object(fields) = &mut row {
            if let Some(visible) = &self.visible {
                fields.retain(|key, _| visible.iter().any(|field| field == key));
            }
            fields.retain(|key, _| !self.hidden.iter().any(|field| field == key));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_hidden_wins_over_visible() {
        let mut visibility = FieldVisibility::default();
        visibility.set_visible(["id", "name", "age"]);
        visibility.set_hidden(["age"]);

        let row = visibility.apply(json!({"id": 1, "name": "A", "age": 30, "status": "new"}));
        assert_eq!(row, json!({"id": 1, "name": "A"}));
    }

    #[test]
    fn test_unrestricted_passes_rows_through() {
        let visibility = FieldVisibility::default();
        let row = json!({"id": 1});

        assert!(visibility.is_unrestricted());
        assert_eq!(visibility.apply(row.clone()), row);
    }
}
