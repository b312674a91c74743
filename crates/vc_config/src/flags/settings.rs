use serde::{Deserialize, Serialize};

use super::Flag;

// -----------------------------------------------------------------------------
// FlagSettings

/// Process-wide flag values loaded from a configuration source.
///
/// Every field is optional; an absent field leaves the process-wide slot
/// untouched when applied with [`FlagStore::apply`](crate::FlagStore::apply).
///
/// # Examples
///
/// ```
/// use vc_config::{Flag, FlagSettings, TextConfig};
///
/// let settings: FlagSettings = serde_json::from_str(
///     r#"{ "include_null_values": true, "emit_camel_case_names": true }"#,
/// ).unwrap();
///
/// let config = TextConfig::new();
/// config.flags().apply(&settings);
///
/// let scope = config.scope();
/// assert!(scope.get(Flag::IncludeNullValues));
/// assert!(scope.get(Flag::EmitCamelCaseNames));
/// assert!(!scope.get(Flag::ExcludeTypeInfo));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlagSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert_objects_to_string_map: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_null_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_type_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit_camel_case_names: Option<bool>,
}

impl FlagSettings {
    /// Returns the configured value of `flag`.
    pub const fn get(&self, flag: Flag) -> Option<bool> {
        match flag {
            Flag::ConvertObjectsToStringMap => self.convert_objects_to_string_map,
            Flag::IncludeNullValues => self.include_null_values,
            Flag::ExcludeTypeInfo => self.exclude_type_info,
            Flag::EmitCamelCaseNames => self.emit_camel_case_names,
        }
    }

    /// Sets the configured value of `flag`.
    pub fn set(&mut self, flag: Flag, value: Option<bool>) {
        let field = match flag {
            Flag::ConvertObjectsToStringMap => &mut self.convert_objects_to_string_map,
            Flag::IncludeNullValues => &mut self.include_null_values,
            Flag::ExcludeTypeInfo => &mut self.exclude_type_info,
            Flag::EmitCamelCaseNames => &mut self.emit_camel_case_names,
        };
        *field = value;
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FlagSettings;
    use crate::{Flag, FlagStore};

    #[test]
    fn from_ron() {
        let settings: FlagSettings =
            ron::from_str("(exclude_type_info: Some(true), emit_camel_case_names: Some(false))")
                .unwrap();
        assert_eq!(settings.get(Flag::ExcludeTypeInfo), Some(true));
        assert_eq!(settings.get(Flag::EmitCamelCaseNames), Some(false));
        assert_eq!(settings.get(Flag::IncludeNullValues), None);
    }

    #[test]
    fn unknown_field_rejected() {
        let result = serde_json::from_str::<FlagSettings>(r#"{ "emitCamelCaseNames": true }"#);
        assert!(result.is_err());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let mut settings = FlagSettings::default();
        settings.set(Flag::IncludeNullValues, Some(true));
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"include_null_values":true}"#);
    }

    #[test]
    fn apply_respects_first_write_wins() {
        let store = FlagStore::new();
        store.set(Flag::EmitCamelCaseNames, true);

        let mut settings = FlagSettings::default();
        settings.set(Flag::EmitCamelCaseNames, Some(false));
        store.apply(&settings);

        assert_eq!(store.get(Flag::EmitCamelCaseNames), Some(true));
    }
}
