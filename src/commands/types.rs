use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::core::{
    GlosorError,
    Glosa,
};

/// Index-addressed and append edits, tagged by `action` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum EditCommand {
    Replace { index: i64, value: Glosa },
    Create { value: Glosa },
    Delete { index: i64 },
}

/// One mutation delivered over the command channel.
#[derive(Debug, Clone, PartialEq)]
pub enum VocabCommand {
    Edit(EditCommand),
    /// A bare entry array: wholesale replacement of the vocabulary.
    BulkReplace(Vec<Glosa>),
}

impl VocabCommand {
    pub fn replace(index: usize, value: Glosa) -> Self {
        VocabCommand::Edit(EditCommand::Replace { index: index as i64, value })
    }

    pub fn create(value: Glosa) -> Self {
        VocabCommand::Edit(EditCommand::Create { value })
    }

    pub fn delete(index: usize) -> Self {
        VocabCommand::Edit(EditCommand::Delete { index: index as i64 })
    }

    /// Decodes a wire payload.
    ///
    /// An array is a bulk replace and every element must be a complete entry with
    /// two non-blank words; the first offending element rejects the whole command.
    /// Anything else must be an object carrying a known `action`.
    pub fn decode(payload: &str) -> Result<Self, GlosorError> {
        let value: Value = serde_json::from_str(payload.trim())
            .map_err(|e| GlosorError::MalformedCommand(format!("not JSON: {e}")))?;

        match value {
            Value::Array(items) => decode_bulk(items).map(VocabCommand::BulkReplace),
            Value::Object(_) => serde_json::from_value::<EditCommand>(value)
                .map(VocabCommand::Edit)
                .map_err(|e| GlosorError::MalformedCommand(e.to_string())),
            other => Err(GlosorError::MalformedCommand(format!(
                "expected an object or an array, got {other}"
            ))),
        }
    }

    pub fn to_json(&self) -> Result<String, GlosorError> {
        let json = match self {
            VocabCommand::Edit(edit) => serde_json::to_string(edit)?,
            VocabCommand::BulkReplace(entries) => serde_json::to_string(entries)?,
        };
        Ok(json)
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            VocabCommand::Edit(EditCommand::Replace { .. }) => "replace",
            VocabCommand::Edit(EditCommand::Create { .. }) => "create",
            VocabCommand::Edit(EditCommand::Delete { .. }) => "delete",
            VocabCommand::BulkReplace(_) => "bulk_replace",
        }
    }
}

fn decode_bulk(items: Vec<Value>) -> Result<Vec<Glosa>, GlosorError> {
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let glosa: Glosa = serde_json::from_value(item)
            .map_err(|e| GlosorError::BulkReplaceRejected { index, reason: e.to_string() })?;
        validate_bulk_entry(index, &glosa)?;
        entries.push(glosa);
    }
    Ok(entries)
}

pub(crate) fn validate_bulk_entry(index: usize, glosa: &Glosa) -> Result<(), GlosorError> {
    if glosa.has_blank_word() {
        return Err(GlosorError::BulkReplaceRejected {
            index,
            reason: format!("blank word in \"{glosa}\""),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_edits() {
        let replace = VocabCommand::decode(
            r#"{"action":"replace","index":2,"value":{"words":["Vi","Biz"],"tags":["pronoun"]}}"#,
        )
        .unwrap();
        assert_eq!(
            replace,
            VocabCommand::replace(2, Glosa::new("Vi", "Biz").with_tags(["pronoun"]))
        );

        let create =
            VocabCommand::decode(r#"{"action":"create","value":{"words":["Jag","Ben"],"tags":[]}}"#)
                .unwrap();
        assert_eq!(create, VocabCommand::create(Glosa::new("Jag", "Ben")));

        let delete = VocabCommand::decode(r#"{"action":"delete","index":-1}"#).unwrap();
        assert_eq!(delete, VocabCommand::Edit(EditCommand::Delete { index: -1 }));
    }

    #[test]
    fn test_decode_malformed() {
        for payload in [
            "{not json",
            r#"{"action":"rename","index":0}"#,
            r#"{"index":0}"#,
            r#"{"action":"delete"}"#,
            r#""delete""#,
        ] {
            match VocabCommand::decode(payload) {
                Err(GlosorError::MalformedCommand(_)) => {}
                other => panic!("Expected MalformedCommand for {payload}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_bulk() {
        let bulk = VocabCommand::decode(
            r#"[{"words":["Jag","Ben"],"tags":[]},{"words":["Du","Sen"],"tags":["x"]}]"#,
        )
        .unwrap();
        assert_eq!(
            bulk,
            VocabCommand::BulkReplace(vec![
                Glosa::new("Jag", "Ben"),
                Glosa::new("Du", "Sen").with_tags(["x"]),
            ])
        );

        // Empty array is a valid (if drastic) replacement
        assert_eq!(VocabCommand::decode("[]").unwrap(), VocabCommand::BulkReplace(Vec::new()));
    }

    #[test]
    fn test_bulk_rejects_whole_payload() {
        let missing_tags =
            VocabCommand::decode(r#"[{"words":["Jag","Ben"],"tags":[]},{"words":["Du","Sen"]}]"#);
        assert!(matches!(missing_tags, Err(GlosorError::BulkReplaceRejected { index: 1, .. })));

        let blank = VocabCommand::decode(r#"[{"words":["  ","Ben"],"tags":[]}]"#);
        assert!(matches!(blank, Err(GlosorError::BulkReplaceRejected { index: 0, .. })));
    }

    #[test]
    fn test_encode_matches_wire_shape() {
        let json = VocabCommand::delete(3).to_json().unwrap();
        assert_eq!(json, r#"{"action":"delete","index":3}"#);

        let json = VocabCommand::create(Glosa::new("Su", "Vatten")).to_json().unwrap();
        assert_eq!(json, r#"{"action":"create","value":{"words":["Su","Vatten"],"tags":[]}}"#);

        let original = VocabCommand::replace(0, Glosa::new("Äta", "yer").with_tags(["verb"]));
        assert_eq!(VocabCommand::decode(&original.to_json().unwrap()).unwrap(), original);
    }
}
