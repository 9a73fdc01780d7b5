//! ElevenLabs voice name lookup table
//!
//! Pure configuration data: a fixed mapping from friendly voice names to
//! provider voice identifiers. Unknown names fall back to the primary
//! voice.

/// Friendly name → ElevenLabs voice ID
pub const VOICES: [(&str, &str); 24] = [
    ("Rachel", "21m00Tcm4TlvDq8ikWAM"),
    ("Drew", "29vD33N1CtxCmqQRPOHJ"),
    ("Clyde", "2EiwWnXFnvU5JabPnv8n"),
    ("Paul", "5Q0t7uMcjvnagumLfvZi"),
    ("Domi", "AZnzlk1XvdvUeBnXmlld"),
    ("Dave", "CYw3kZ02Hs0563khs1Fj"),
    ("Fin", "D38z5RcWu1voky8WS1ja"),
    ("Sarah", "EXAVITQu4vr4xnSDxMaL"),
    ("Antoni", "ErXwobaYiN019PkySvjV"),
    ("Thomas", "GBv7mTt0atIp3Br8iCZE"),
    ("Charlie", "IKne3meq5aSn9XLyUdCD"),
    ("George", "JBFqnCBsd6RMkjVDRZzb"),
    ("Emily", "LcfcDJNUP1GQjkzn1xUU"),
    ("Elli", "MF3mGyEYCl7XYWbV9V6O"),
    ("Callum", "N2lVS1w4EtoT3dr4eOWO"),
    ("Patrick", "ODq5zmih8GrVes37Dizd"),
    ("Harry", "SOYHLrjzK2X1ezoPC6cr"),
    ("Liam", "TX3LPaxmHKxFdv7VOQHJ"),
    ("Dorothy", "ThT5KcBeYPX3keUQqHPh"),
    ("Josh", "TxGEqnHWrfWFTfGW9XjX"),
    ("Arnold", "VR6AewLTigWG4xSOukaG"),
    ("Charlotte", "XB0fDUnXU5powFXDhCwa"),
    ("Alice", "Xb7hH8MSUJpSbSDYk0k2"),
    ("Matilda", "XrExE9yKIg1WjnnlVkGX"),
];

/// Resolve a voice name to its ElevenLabs voice ID
///
/// Names absent from the table (including the empty string) resolve to the
/// primary voice, Rachel.
#[must_use]
pub fn voice_id(name: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(voice_name, _)| *voice_name == name)
        .map_or(VOICES[0].1, |(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(voice_id("Rachel"), "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(voice_id("Josh"), "TxGEqnHWrfWFTfGW9XjX");
        assert_eq!(voice_id("Matilda"), "XrExE9yKIg1WjnnlVkGX");
    }

    #[test]
    fn test_all_ids_distinct() {
        for (i, (_, id_a)) in VOICES.iter().enumerate() {
            for (_, id_b) in &VOICES[i + 1..] {
                assert_ne!(id_a, id_b);
            }
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_rachel() {
        assert_eq!(voice_id("Nobody"), voice_id("Rachel"));
    }

    #[test]
    fn test_empty_name_falls_back_to_rachel() {
        assert_eq!(voice_id(""), voice_id("Rachel"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // "rachel" is not in the table, so it falls back to the default
        assert_eq!(voice_id("rachel"), VOICES[0].1);
    }
}
