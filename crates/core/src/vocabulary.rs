//! Fixed tag vocabularies for each personality system.
//!
//! Each system accepts a closed set of tags; anything outside the set is
//! rejected at vote time.

use persona_db::entities::comment::PersonalityType;

/// The 16 canonical MBTI types.
pub const MBTI_TAGS: [&str; 16] = [
    "INFP", "INFJ", "ENFP", "ENFJ", "INTJ", "INTP", "ENTP", "ENTJ", "ISFP", "ISFJ", "ESFP",
    "ESFJ", "ISTP", "ISTJ", "ESTP", "ESTJ",
];

/// The deployed Enneagram wing list, kept byte-for-byte. The irregular
/// entries ("lw2", "4wb", "6wWb", "6W7", "7wW6", "wl") are the accepted
/// wire values; changing them would reject votes that used to pass.
pub const ENNEAGRAM_TAGS: [&str; 16] = [
    "lw2", "2w3", "3w2", "3w4", "4w3", "4wb", "5w4", "5w6", "6wWb", "6W7", "7wW6", "7w8", "8w7",
    "8w9", "9w8", "wl",
];

/// The 12 zodiac signs.
pub const ZODIAC_TAGS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Accepted tags for a personality system.
#[must_use]
pub const fn tags_for(personality_type: PersonalityType) -> &'static [&'static str] {
    match personality_type {
        PersonalityType::Mbti => &MBTI_TAGS,
        PersonalityType::Enneagram => &ENNEAGRAM_TAGS,
        PersonalityType::Zodiac => &ZODIAC_TAGS,
    }
}

/// Check whether a tag belongs to a system's vocabulary.
#[must_use]
pub fn is_valid_tag(personality_type: PersonalityType, tag: &str) -> bool {
    tags_for(personality_type).contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(tags_for(PersonalityType::Mbti).len(), 16);
        assert_eq!(tags_for(PersonalityType::Enneagram).len(), 16);
        assert_eq!(tags_for(PersonalityType::Zodiac).len(), 12);
    }

    #[test]
    fn test_mbti_tags() {
        assert!(is_valid_tag(PersonalityType::Mbti, "INFP"));
        assert!(is_valid_tag(PersonalityType::Mbti, "ESTJ"));
        assert!(!is_valid_tag(PersonalityType::Mbti, "XXXX"));
        // Case-sensitive
        assert!(!is_valid_tag(PersonalityType::Mbti, "infp"));
    }

    #[test]
    fn test_enneagram_tags_are_verbatim() {
        // The irregular entries are part of the accepted vocabulary
        assert!(is_valid_tag(PersonalityType::Enneagram, "lw2"));
        assert!(is_valid_tag(PersonalityType::Enneagram, "6wWb"));
        assert!(is_valid_tag(PersonalityType::Enneagram, "wl"));
        assert!(is_valid_tag(PersonalityType::Enneagram, "4w3"));
        // The regularized spellings they displace are not
        assert!(!is_valid_tag(PersonalityType::Enneagram, "1w2"));
        assert!(!is_valid_tag(PersonalityType::Enneagram, "6w5"));
    }

    #[test]
    fn test_zodiac_tags() {
        assert!(is_valid_tag(PersonalityType::Zodiac, "Leo"));
        assert!(is_valid_tag(PersonalityType::Zodiac, "Pisces"));
        assert!(!is_valid_tag(PersonalityType::Zodiac, "Ophiuchus"));
    }

    #[test]
    fn test_tags_never_cross_systems() {
        assert!(!is_valid_tag(PersonalityType::Zodiac, "INFP"));
        assert!(!is_valid_tag(PersonalityType::Mbti, "Leo"));
        assert!(!is_valid_tag(PersonalityType::Enneagram, "INFP"));
    }
}
