use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Prebuilt voice timbres recognized by the remote speech model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum VoiceIdentity {
    Kore,
    Charon,
    Fenrir,
    Puck,
    Aoede,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum VoiceType {
    #[default]
    #[strum(serialize = "بالغ")]
    Adult,
    #[strum(serialize = "كبار السن")]
    Elderly,
    #[strum(serialize = "شخصية كارتونية")]
    Cartoon,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum CategoryKey {
    Doc,
    Ads,
    Cartoon,
    Podcast,
    Novels,
    Youtube,
    Drama,
    Edu,
    Corporate,
}

/// A named persona offered for a dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceProfile {
    pub name: &'static str,
    pub gender: Gender,
    pub voice_type: VoiceType,
    pub category: &'static str,
    pub category_key: CategoryKey,
    pub description: &'static str,
}

/// Maps the persona's voice type and gender onto a remote voice timbre.
pub fn base_voice_for(voice_type: VoiceType, gender: Gender) -> VoiceIdentity {
    match (gender, voice_type) {
        (Gender::Female, _) => VoiceIdentity::Kore,
        (Gender::Male, VoiceType::Elderly) => VoiceIdentity::Charon,
        (Gender::Male, VoiceType::Cartoon) => VoiceIdentity::Kore,
        (Gender::Male, VoiceType::Adult) => VoiceIdentity::Fenrir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_base_voice_mapping() {
        assert_eq!(base_voice_for(VoiceType::Adult, Gender::Female), VoiceIdentity::Kore);
        assert_eq!(base_voice_for(VoiceType::Elderly, Gender::Female), VoiceIdentity::Kore);
        assert_eq!(base_voice_for(VoiceType::Elderly, Gender::Male), VoiceIdentity::Charon);
        assert_eq!(base_voice_for(VoiceType::Cartoon, Gender::Male), VoiceIdentity::Kore);
        assert_eq!(base_voice_for(VoiceType::Adult, Gender::Male), VoiceIdentity::Fenrir);
    }

    #[test]
    fn test_voice_type_labels() {
        assert_eq!(VoiceType::Elderly.to_string(), "كبار السن");
        assert_eq!(VoiceType::from_str("شخصية كارتونية").unwrap(), VoiceType::Cartoon);
    }

    #[test]
    fn test_voice_identity_names() {
        assert_eq!(VoiceIdentity::Fenrir.as_ref(), "Fenrir");
        assert_eq!(VoiceIdentity::from_str("Charon").unwrap(), VoiceIdentity::Charon);
        assert!(VoiceIdentity::from_str("Alloy").is_err());
        assert_eq!(serde_json::to_string(&VoiceIdentity::Kore).unwrap(), "\"Kore\"");
    }
}
