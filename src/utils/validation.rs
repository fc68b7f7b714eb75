use std::collections::HashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::config::{RawSettings, RawTextureEntry, TextureConfigDocument, TextureEntry, ValidatedDocument, normalize_name};
use crate::core::{MaxSize, Quality, SettingsOverride, TextureSettings};
use crate::utils::ConfigError;

/// Validates a parsed configuration document.
///
/// Checks the shape of both blocks, required fields, the `maxSize` enumeration,
/// the quality range, and rejects entries whose names collide after normalization.
pub fn validate_document(doc: &TextureConfigDocument) -> Result<ValidatedDocument, ConfigError> {
    let defaults = validate_defaults(&object::<RawSettings>(&doc.default_settings, "defaultSettings")?)?;

    let items = match &doc.textures {
        Value::Array(items) => items,
        Value::Null => return Err(ConfigError::invalid("textures", "is required")),
        other => return Err(ConfigError::invalid("textures", format!("must be an array, got {other}"))),
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, item) in items.iter().enumerate() {
        let prefix = format!("textures[{idx}]");
        let raw: RawTextureEntry = object(item, &prefix)?;

        let name = required(raw.name.as_ref(), &format!("{prefix}.name"), parse_name)?;
        let key = normalize_name(&name);
        if key.is_empty() {
            return Err(ConfigError::invalid(format!("{prefix}.name"), "cannot be empty"));
        }

        let use_default = required(raw.use_default.as_ref(), &format!("{prefix}.useDefault"), parse_bool)?;

        let overrides = SettingsOverride {
            max_size: optional(raw.max_size.as_ref(), &format!("{prefix}.maxSize"), parse_max_size)?,
            quality: optional(raw.quality.as_ref(), &format!("{prefix}.quality"), parse_quality)?,
        };

        if let Some(first) = seen.insert(key.clone(), idx) {
            return Err(ConfigError::DuplicateName {
                name: key,
                first,
                second: idx,
            });
        }

        entries.push(TextureEntry {
            name,
            use_default,
            overrides,
        });
    }

    Ok(ValidatedDocument { defaults, entries })
}

/// Validates the `defaultSettings` block, where every field is required.
pub fn validate_defaults(raw: &RawSettings) -> Result<TextureSettings, ConfigError> {
    let max_size = required(raw.max_size.as_ref(), "defaultSettings.maxSize", parse_max_size)?;
    let quality = required(raw.quality.as_ref(), "defaultSettings.quality", parse_quality)?;

    Ok(TextureSettings { max_size, quality })
}

fn optional<T>(
    value: Option<&Value>,
    field: &str,
    parse: fn(&Value, &str) -> Result<T, ConfigError>,
) -> Result<Option<T>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse(v, field).map(Some),
    }
}

fn required<T>(
    value: Option<&Value>,
    field: &str,
    parse: fn(&Value, &str) -> Result<T, ConfigError>,
) -> Result<T, ConfigError> {
    optional(value, field, parse)?.ok_or_else(|| ConfigError::invalid(field, "is required"))
}

/// Reads a JSON object into its raw block type. Every field of the raw types is
/// optional, so only the outer shape can fail here.
fn object<T: DeserializeOwned>(value: &Value, field: &str) -> Result<T, ConfigError> {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::invalid(field, e.to_string())),
        Value::Null => Err(ConfigError::invalid(field, "is required")),
        other => Err(ConfigError::invalid(field, format!("must be an object, got {other}"))),
    }
}

fn parse_name(value: &Value, field: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid(field, format!("must be a string, got {value}")))
}

fn parse_bool(value: &Value, field: &str) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(field, format!("must be true or false, got {value}")))
}

fn as_integer(value: &Value, field: &str) -> Result<u32, ConfigError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ConfigError::invalid(field, format!("must be a positive integer, got {value}")))
}

fn parse_max_size(value: &Value, field: &str) -> Result<MaxSize, ConfigError> {
    MaxSize::try_from(as_integer(value, field)?).map_err(|reason| ConfigError::invalid(field, reason))
}

fn parse_quality(value: &Value, field: &str) -> Result<Quality, ConfigError> {
    let n = value.as_u64().ok_or_else(|| {
        ConfigError::invalid(field, format!("must be an integer between 1 and 100, got {value}"))
    })?;
    u32::try_from(n)
        .map_err(|_| format!("must be between 1 and 100, got {n}"))
        .and_then(Quality::try_from)
        .map_err(|reason| ConfigError::invalid(field, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(json: &str) -> TextureConfigDocument {
        TextureConfigDocument::from_json(json, Path::new("test.json")).unwrap()
    }

    fn invalid_field(json: &str) -> String {
        match validate_document(&parse(json)) {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_document() {
        let doc = parse(r#"{
            "defaultSettings": { "maxSize": 512, "quality": 80 },
            "textures": [
                { "name": "Hero", "useDefault": false, "maxSize": 1024, "quality": 90 },
                { "name": "ui_icons", "useDefault": true },
                { "name": "floor", "useDefault": false, "quality": null }
            ]
        }"#);

        let validated = validate_document(&doc).unwrap();
        assert_eq!(validated.defaults.max_size, MaxSize::S512);
        assert_eq!(validated.entries.len(), 3);
        assert_eq!(validated.entries[0].overrides.max_size, Some(MaxSize::S1024));
        assert_eq!(validated.entries[2].overrides, SettingsOverride::default());
    }

    #[test]
    fn reports_quality_out_of_range() {
        let field = invalid_field(r#"{
            "defaultSettings": { "maxSize": 512, "quality": 150 },
            "textures": []
        }"#);
        assert_eq!(field, "defaultSettings.quality");
    }

    #[test]
    fn reports_max_size_outside_enumeration() {
        let field = invalid_field(r#"{
            "defaultSettings": { "maxSize": 512, "quality": 80 },
            "textures": [
                { "name": "a", "useDefault": false },
                { "name": "b", "useDefault": false, "maxSize": 300 }
            ]
        }"#);
        assert_eq!(field, "textures[1].maxSize");
    }

    #[test]
    fn reports_missing_required_fields() {
        assert_eq!(
            invalid_field(r#"{ "defaultSettings": { "quality": 80 }, "textures": [] }"#),
            "defaultSettings.maxSize"
        );
        assert_eq!(
            invalid_field(r#"{
                "defaultSettings": { "maxSize": 64, "quality": 80 },
                "textures": [{ "name": "x" }]
            }"#),
            "textures[0].useDefault"
        );
        assert_eq!(
            invalid_field(r#"{
                "defaultSettings": { "maxSize": 64, "quality": 80 },
                "textures": [{ "name": "  ", "useDefault": true }]
            }"#),
            "textures[0].name"
        );
    }

    #[test]
    fn rejects_non_integer_numbers() {
        let field = invalid_field(r#"{
            "defaultSettings": { "maxSize": 512, "quality": 80.5 },
            "textures": []
        }"#);
        assert_eq!(field, "defaultSettings.quality");
    }

    #[test]
    fn reports_wrongly_typed_entry_fields() {
        assert_eq!(
            invalid_field(r#"{
                "defaultSettings": { "maxSize": 512, "quality": 80 },
                "textures": [
                    { "name": "rock", "useDefault": true },
                    { "name": "hero", "useDefault": "no" }
                ]
            }"#),
            "textures[1].useDefault"
        );
        assert_eq!(
            invalid_field(r#"{
                "defaultSettings": { "maxSize": 512, "quality": 80 },
                "textures": [{ "name": 5, "useDefault": true }]
            }"#),
            "textures[0].name"
        );
    }

    #[test]
    fn reports_malformed_blocks_by_name() {
        assert_eq!(
            invalid_field(r#"{ "defaultSettings": 3, "textures": [] }"#),
            "defaultSettings"
        );
        assert_eq!(
            invalid_field(r#"{ "textures": [] }"#),
            "defaultSettings"
        );
        assert_eq!(
            invalid_field(r#"{ "defaultSettings": { "maxSize": 512, "quality": 80 }, "textures": {} }"#),
            "textures"
        );
        assert_eq!(
            invalid_field(r#"{ "defaultSettings": { "maxSize": 512, "quality": 80 }, "textures": [5] }"#),
            "textures[0]"
        );
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let doc = parse(r#"{
            "defaultSettings": { "maxSize": 512, "quality": 80 },
            "textures": [
                { "name": "Hero", "useDefault": false },
                { "name": "rock", "useDefault": true },
                { "name": "HERO", "useDefault": true }
            ]
        }"#);

        match validate_document(&doc) {
            Err(ConfigError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "hero");
                assert_eq!((first, second), (0, 2));
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }
}
