use serde::{Deserialize, Serialize};

/// The four catalog themes. Stateless; chosen once per render call and used
/// to select a renderer strategy. Every variant shares one geometric contract
/// with the pagination engine and differs only in visual rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDescriptor {
    Modern,
    Classic,
    Elegant,
    Minimal,
}

impl ThemeDescriptor {
    pub const ALL: [ThemeDescriptor; 4] = [
        ThemeDescriptor::Modern,
        ThemeDescriptor::Classic,
        ThemeDescriptor::Elegant,
        ThemeDescriptor::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeDescriptor::Modern => "modern",
            ThemeDescriptor::Classic => "classic",
            ThemeDescriptor::Elegant => "elegant",
            ThemeDescriptor::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for ThemeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip_lowercase() {
        let json = serde_json::to_string(&ThemeDescriptor::Elegant).unwrap();
        assert_eq!(json, "\"elegant\"");
        let back: ThemeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ThemeDescriptor::Elegant);
    }

    #[test]
    fn test_all_lists_every_variant_once() {
        let names: std::collections::HashSet<&str> =
            ThemeDescriptor::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), 4);
    }
}
