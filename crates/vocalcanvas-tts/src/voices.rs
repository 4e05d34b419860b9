//! Voice registry
//!
//! Voices are enumerated once at startup and carried in an explicitly passed
//! registry for the lifetime of the process. Consumers resolve a requested
//! voice against it rather than trusting client input.

use crate::types::VoiceInfo;

/// Voices tried first when picking a default, in order.
const PREFERRED_DEFAULTS: [&str; 3] = ["Samantha", "Daniel", "Alex"];

/// Ordered, de-duplicated list of the voices available at startup.
#[derive(Debug, Clone, Default)]
pub struct VoiceRegistry {
    voices: Vec<VoiceInfo>,
}

impl VoiceRegistry {
    /// Build a registry, dropping duplicate ids while preserving order.
    pub fn new(voices: Vec<VoiceInfo>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let voices = voices
            .into_iter()
            .filter(|v| seen.insert(v.id.clone()))
            .collect();
        Self { voices }
    }

    pub fn voices(&self) -> &[VoiceInfo] {
        &self.voices
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.voices.iter().any(|v| v.id == id)
    }

    /// The voice used when a request does not name a known one.
    pub fn default_voice(&self) -> Option<&VoiceInfo> {
        for preferred in PREFERRED_DEFAULTS {
            if let Some(voice) = self.voices.iter().find(|v| v.id == preferred) {
                return Some(voice);
            }
        }
        self.voices.first()
    }

    /// Map a requested voice id to a known voice, falling back to the default.
    ///
    /// Returns `None` only when the registry itself is empty.
    pub fn resolve(&self, requested: Option<&str>) -> Option<&VoiceInfo> {
        if let Some(id) = requested {
            let id = id.trim();
            if !id.is_empty() {
                if let Some(voice) = self.voices.iter().find(|v| v.id == id) {
                    return Some(voice);
                }
            }
        }
        self.default_voice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> VoiceRegistry {
        VoiceRegistry::new(ids.iter().copied().map(VoiceInfo::new).collect())
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let reg = registry(&["Alex", "Fred", "Alex", "Vicki"]);
        let ids: Vec<&str> = reg.voices().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["Alex", "Fred", "Vicki"]);
    }

    #[test]
    fn preferred_default_wins() {
        let reg = registry(&["Fred", "Daniel", "Samantha"]);
        assert_eq!(reg.default_voice().unwrap().id, "Samantha");

        let reg = registry(&["Fred", "Daniel"]);
        assert_eq!(reg.default_voice().unwrap().id, "Daniel");

        let reg = registry(&["Fred", "Vicki"]);
        assert_eq!(reg.default_voice().unwrap().id, "Fred");
    }

    #[test]
    fn unknown_request_falls_back_to_default() {
        let reg = registry(&["Samantha", "Fred"]);
        assert_eq!(reg.resolve(Some("Zarvox")).unwrap().id, "Samantha");
        assert_eq!(reg.resolve(Some("Fred")).unwrap().id, "Fred");
        assert_eq!(reg.resolve(Some("   ")).unwrap().id, "Samantha");
        assert_eq!(reg.resolve(None).unwrap().id, "Samantha");
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let reg = VoiceRegistry::default();
        assert!(reg.is_empty());
        assert!(reg.resolve(Some("Samantha")).is_none());
        assert!(reg.default_voice().is_none());
    }
}
