use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    #[default]
    #[strum(serialize = "Chaleureux")]
    Warm,
    #[strum(serialize = "Neutre")]
    Neutral,
    #[strum(serialize = "Froid")]
    Cold,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    #[strum(serialize = "Calme")]
    Calm,
    #[strum(serialize = "Expressif")]
    Expressive,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    #[strum(serialize = "Lente")]
    Slow,
    #[default]
    #[strum(serialize = "Normale")]
    Normal,
    #[strum(serialize = "Rapide")]
    Fast,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Drama {
    #[default]
    #[strum(serialize = "Légère")]
    Light,
    #[strum(serialize = "Épique")]
    Epic,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Narration {
    #[strum(serialize = "Sérieuse")]
    Serious,
    #[default]
    #[strum(serialize = "Narrative")]
    Narrative,
    #[strum(serialize = "Poétique")]
    Poetic,
}

/// Depth and pitch setting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[strum(serialize = "منخفضة")]
    Low,
    #[default]
    #[strum(serialize = "متوسطة")]
    Medium,
    #[strum(serialize = "مرتفعة")]
    High,
}

/// A control whose options carry a human-facing description.
pub trait ControlOption: Copy + IntoEnumIterator + std::fmt::Display {
    fn description(&self) -> &'static str;
}

impl ControlOption for Temperature {
    fn description(&self) -> &'static str {
        match self {
            Self::Warm => "Une voix humaine et enveloppante. دافئ مُشبع بالإحساس.",
            Self::Neutral => "Équilibré et objectif. متوازن وموضوعي.",
            Self::Cold => "Direct et analytique. حاد محايد.",
        }
    }
}

impl ControlOption for Emotion {
    fn description(&self) -> &'static str {
        match self {
            Self::Calm => "Fluide et posé. إلقاء سلس هادئ.",
            Self::Expressive => "Vibrant et vivant. نبرة مؤثرة مليئة بالحيوية.",
        }
    }
}

impl ControlOption for Speed {
    fn description(&self) -> &'static str {
        match self {
            Self::Slow => "Pour les récits profonds. للروايات المركزة.",
            Self::Normal => "Standard et polyvalent. متوازنة لمعظم المحتوى.",
            Self::Fast => "Idéal pour le marketing. للإعلانات السريعة.",
        }
    }
}

impl ControlOption for Drama {
    fn description(&self) -> &'static str {
        match self {
            Self::Light => "Réaliste. مناسب للمحتوى الواقعي.",
            Self::Epic => "Héroïque et cinématique. ملحمي وقوي.",
        }
    }
}

impl ControlOption for Narration {
    fn description(&self) -> &'static str {
        match self {
            Self::Serious => "Style informatif et factuel. أسلوب إخباري واقعي.",
            Self::Narrative => "Storytelling fluide. سرد قصصي انسيابي.",
            Self::Poetic => "Lyrique et inspirant. أسلوب أدبي ملهم.",
        }
    }
}

impl ControlOption for Level {
    fn description(&self) -> &'static str {
        match self {
            Self::Low => "Grave et posé. عميق ومنخفض.",
            Self::Medium => "Équilibré. متوسط ومتوازن.",
            Self::High => "Clair et lumineux. مرتفع وواضح.",
        }
    }
}

/// Stylistic modulations applied to one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudioControls {
    #[serde(default)]
    pub temp: Temperature,
    #[serde(default)]
    pub emotion: Emotion,
    #[serde(default)]
    pub speed: Speed,
    #[serde(default)]
    pub depth: Level,
    #[serde(default)]
    pub pitch: Level,
    #[serde(default)]
    pub drama: Drama,
    #[serde(default)]
    pub narration: Narration,
}

impl StudioControls {
    /// One-line summary embedded in the performance note.
    pub fn summary(&self) -> String {
        format!(
            "Temp({}), Emotion({}), Speed({}), Depth({}), Pitch({}), Drama({}), Narration({})",
            self.temp, self.emotion, self.speed, self.depth, self.pitch, self.drama, self.narration
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    pub label: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub options: Vec<OptionInfo>,
}

fn group<T: ControlOption>(key: &'static str, title: &'static str) -> ControlGroup {
    ControlGroup {
        key,
        title,
        options: T::iter()
            .map(|option| OptionInfo {
                label: option.to_string(),
                description: option.description(),
            })
            .collect(),
    }
}

/// Every control with its options, in display order.
pub fn control_groups() -> Vec<ControlGroup> {
    vec![
        group::<Temperature>("temp", "Ton / حرارة الصوت"),
        group::<Emotion>("emotion", "Emotion / الانفعال"),
        group::<Speed>("speed", "Vitesse / السرعة"),
        group::<Level>("depth", "Profondeur / العمق"),
        group::<Level>("pitch", "Hauteur / طبقة الصوت"),
        group::<Drama>("drama", "Intensité / الدراما"),
        group::<Narration>("narration", "Narration / السرد"),
    ]
}
