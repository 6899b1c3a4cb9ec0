use crate::aliasor::Aliasor;

// Per-build outgroup allow-lists, keyed by build name. A build listed here
// only keeps labels whose uncompressed form starts with one of its
// prefixes; new clade builds are added here, not in the filter logic.
const BUILD_ALLOWED_PREFIXES: &[(&str, &[&str])] = &[
    ("21L", &["B.1.1.529.2", "B.1.1.529.4", "B.1.1.529.5", "X"]),
    ("22F", &["B.1.1.529.2", "B.1.1.529.4", "B.1.1.529.5", "X"]),
];

/// Blanks labels outside a clade build's plausible outgroup region.
/// Builds without an allow-list pass every label through unchanged.
pub struct OutgroupFilter {
    allowed: Option<&'static [&'static str]>,
}

impl OutgroupFilter {
    pub fn for_build(build_name: &str) -> Self {
        let allowed = BUILD_ALLOWED_PREFIXES
            .iter()
            .find(|(name, _)| *name == build_name)
            .map(|(_, prefixes)| *prefixes);
        Self { allowed }
    }

    /// Whether this build blanks anything at all.
    pub fn is_active(&self) -> bool {
        self.allowed.is_some()
    }

    /// Keep `label` if its uncompressed form starts with an allowed
    /// prefix, otherwise blank it to the empty string.
    pub fn apply(&self, aliasor: &Aliasor, label: &str) -> String {
        let Some(allowed) = self.allowed else {
            return label.to_string();
        };
        let uncompressed = aliasor.uncompress(label);
        if allowed.iter().any(|prefix| uncompressed.starts_with(prefix)) {
            label.to_string()
        } else {
            String::new()
        }
    }
}
