use serde::{Deserialize, Serialize};

/// User-facing configuration for the string-format inspection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectionConfig {
    /// Maximum assignment-chain hops followed before arity/type inference
    /// gives up. Replaces the host platform's own cycle protection.
    #[serde(default = "default_follow_depth")]
    pub follow_depth: usize,
    /// Report `*` width/precision combined with a mapping-keyed format.
    #[serde(default = "default_check_wildcard_width")]
    pub check_wildcard_width: bool,
}

fn default_follow_depth() -> usize {
    16
}

fn default_check_wildcard_width() -> bool {
    true
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            follow_depth: default_follow_depth(),
            check_wildcard_width: default_check_wildcard_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: InspectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InspectionConfig::default());

        let config: InspectionConfig =
            serde_json::from_str(r#"{"follow_depth": 4, "check_wildcard_width": false}"#).unwrap();
        assert_eq!(config.follow_depth, 4);
        assert!(!config.check_wildcard_width);
    }
}
