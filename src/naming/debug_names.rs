//! Adoption of names recovered from debug symbols

use super::identifier::is_valid_identifier;
use super::settings::NamingSettings;

/// Debug name worth adopting, or `None` when it should be ignored
///
/// Names that are empty, look like decompiler-generated placeholders
/// (`V_0`, `V_1`, ...) or are not valid identifiers are discarded.
pub fn eligible_debug_name<'n>(
    debug_name: Option<&'n str>,
    settings: &NamingSettings,
) -> Option<&'n str> {
    if !settings.use_debug_symbols {
        return None;
    }
    let name = debug_name?;
    if name.is_empty() {
        return None;
    }
    if !settings.generated_name_prefix.is_empty()
        && name.starts_with(settings.generated_name_prefix.as_str())
    {
        log::trace!("ignoring generated debug name {}", name);
        return None;
    }
    if !is_valid_identifier(name) {
        log::trace!("ignoring invalid debug name {:?}", name);
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_adopted() {
        let settings = NamingSettings::default();
        assert_eq!(eligible_debug_name(Some("buffer"), &settings), Some("buffer"));
        assert_eq!(eligible_debug_name(Some("_state2"), &settings), Some("_state2"));
    }

    #[test]
    fn test_rejected_names() {
        let settings = NamingSettings::default();
        assert_eq!(eligible_debug_name(None, &settings), None);
        assert_eq!(eligible_debug_name(Some(""), &settings), None);
        assert_eq!(eligible_debug_name(Some("V_3"), &settings), None);
        assert_eq!(eligible_debug_name(Some("42abc"), &settings), None);
        assert_eq!(eligible_debug_name(Some("CS$<>8__locals1"), &settings), None);
    }

    #[test]
    fn test_disabled_by_settings() {
        let settings = NamingSettings {
            use_debug_symbols: false,
            ..NamingSettings::default()
        };
        assert_eq!(eligible_debug_name(Some("buffer"), &settings), None);
    }

    #[test]
    fn test_custom_generated_prefix() {
        let settings = NamingSettings {
            generated_name_prefix: "loc_".to_string(),
            ..NamingSettings::default()
        };
        assert_eq!(eligible_debug_name(Some("loc_4"), &settings), None);
        assert_eq!(eligible_debug_name(Some("V_3"), &settings), Some("V_3"));
    }
}
