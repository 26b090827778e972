use serde::Serialize;

use super::voice::{CategoryKey, Gender, VoiceProfile, VoiceType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialect {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub profiles: &'static [VoiceProfile],
}

impl Dialect {
    pub fn profiles_for(&self, gender: Gender) -> impl Iterator<Item = &'static VoiceProfile> {
        self.profiles.iter().filter(move |p| p.gender == gender)
    }
}

const fn profile(
    name: &'static str,
    gender: Gender,
    voice_type: VoiceType,
    category: &'static str,
    category_key: CategoryKey,
    description: &'static str,
) -> VoiceProfile {
    VoiceProfile {
        name,
        gender,
        voice_type,
        category,
        category_key,
        description,
    }
}

use CategoryKey::*;
use Gender::{Female, Male};
use VoiceType::{Adult, Cartoon as CartoonVoice};

pub static DIALECTS: &[Dialect] = &[
    Dialect {
        id: "french",
        title: "Français (L’élégance)",
        description: "Voix sophistiquées, claires et mélodieuses pour le marché francophone.",
        profiles: &[
            profile("Claire", Female, Adult, "Narratrice Douce", Novels, "Une voix française élégante et apaisante, parfaite pour les livres audio et les documentaires."),
            profile("Nicolas", Male, Adult, "Voix Corporate", Corporate, "Une voix masculine posée et professionnelle pour vos présentations d’entreprise."),
            profile("Léa", Female, CartoonVoice, "Enfantine / Pub", Cartoon, "Une voix pétillante et dynamique pour les publicités et les contenus jeunesse."),
            profile("Antoine", Male, Adult, "Documentaire Profond", Doc, "Voix grave et assurée pour des récits historiques ou scientifiques captivants."),
        ],
    },
    Dialect {
        id: "english",
        title: "English (The Global Standard)",
        description: "Universal, professional English voices for international audiences.",
        profiles: &[
            profile("Sarah", Female, Adult, "Warm Storyteller", Novels, "Clear British accent with a touch of warmth for storytelling."),
            profile("John", Male, Adult, "Deep Corporate", Corporate, "Authoritative American voice for business and leadership content."),
            profile("Emily", Female, Adult, "Modern Podcast", Podcast, "Friendly and conversational tone, ideal for interviews and tech updates."),
            profile("Michael", Male, Adult, "Action Trailer", Ads, "Powerful, cinematic voice for high-energy trailers and commercials."),
        ],
    },
    Dialect {
        id: "egyptian",
        title: "اللهجة المصرية",
        description: "صوت خفيف الظل، سريع الوتيرة، مثالي للإعلانات والدراما والكوميديا.",
        profiles: &[
            profile("يوسف", Male, Adult, "وثائقي قوي", Doc, "صوت رجولي عميق يناسب الأفلام الوثائقية والروايات التاريخية بنبرة حاكمة مؤثرة."),
            profile("مالك", Male, Adult, "إعلاني سريع", Ads, "صوت سريع وجذاب مخصص لصناعة الإعلانات والمؤثرات التسويقية بأسلوب مرحّب لامع."),
            profile("ليلى", Female, Adult, "إعلان وتسويق", Ads, "لهجة مصرية أنثوية واضحة ونشيطة، مناسبة للإعلانات التجارية السريعة والفواصل الترويجية."),
        ],
    },
    Dialect {
        id: "moroccan",
        title: "اللهجة المغربية",
        description: "نبرة مغاربية فريدة، تمزج بين الأصالة والحداثة، مثالية للمحتوى التسويقي والسينمائي.",
        profiles: &[
            profile("أمين", Male, Adult, "سرد مغربي", Doc, "صوت مغربي دافئ ومميز، مثالي للسرد القصصي والأفلام الوثائقية."),
            profile("كنزة", Female, Adult, "إعلان مغربي", Ads, "نبرة مغربية عصرية، حيوية ومناسبة جداً لإعلانات الراديو والتواصل الاجتماعي."),
        ],
    },
    Dialect {
        id: "levantine",
        title: "اللهجة الشامية",
        description: "لهجة بلاد الشام العريقة (سوريا، لبنان، الأردن، فلسطين)، دافئة وناعمة، مثالية للدراما.",
        profiles: &[
            profile("سامر", Male, Adult, "دراما شامية", Drama, "صوت شامي أصيل، قوي ومؤثر، ممتاز للأعمال الدرامية والدوبلاج."),
            profile("نور", Female, Adult, "رواية ناعمة", Novels, "صوت شامي هادئ وشفاف، يضفي لمسة من الجمال على الكتب الصوتية."),
        ],
    },
    Dialect {
        id: "tunisian",
        title: "اللهجة التونسية",
        description: "لهجة تونسية عذبة، سريعة ورقيقة، تعكس روح المتوسط بلمسة فنية.",
        profiles: &[
            profile("مهدي", Male, Adult, "بودكاست تونسي", Podcast, "صوت تونسي مثقف ومنطلق، مثالي للبودكاست والمحتوى التعليمي."),
            profile("إيناس", Female, Adult, "تسويق تونسي", Ads, "لهجة تونسية واضحة وجذابة، مناسبة جداً للعلامات التجارية الشبابية."),
        ],
    },
    Dialect {
        id: "saudi",
        title: "اللهجة السعودية",
        description: "رصين، فخم، يعكس الهوية السعودية بوضوح واتزان عالي.",
        profiles: &[
            profile("ناصر", Male, Adult, "وثائقي رسمي", Doc, "صوت سعودي ذكوري عميق ورسمي يناسب الأفلام الوثائقية والتقارير الجادة."),
            profile("الجوهرة", Female, Adult, "وثائقي أنثوي", Doc, "نبرة رسمية قوية، مناسبة للروايات والقصص الوثائقية."),
        ],
    },
    Dialect {
        id: "fusha",
        title: "فصحى",
        description: "لغة الضاد، معايير النطق السليم، للوثائقيات والتعليم والكتب الصوتية العالمية.",
        profiles: &[
            profile("طارق", Male, Adult, "روايات", Novels, "صوت عربي فصيح ثابت وواضح مناسب للكتب والروايات الصوتية الطويلة."),
            profile("سلمى", Female, Adult, "تعليم ودروس", Edu, "صوت أنثوي فصيح واضح مناسب للشرح والتدريس والسرد الأكاديمي."),
        ],
    },
];

pub fn find_dialect(id: &str) -> Option<&'static Dialect> {
    DIALECTS.iter().find(|d| d.id == id)
}

/// A production domain the refinement prompt is tuned for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceField {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static VOICE_FIELDS: &[VoiceField] = &[
    VoiceField {
        id: "ads",
        title: "Publicité / الإعلانات",
        description: "Dynamique et énergique. صوت سريع ومباشر مليء بالطاقة.",
    },
    VoiceField {
        id: "doc",
        title: "Documentaire / الوثائقي",
        description: "Profond et formel. صوت عميق ورسمي للسرد التاريخي.",
    },
    VoiceField {
        id: "novels",
        title: "Livre Audio / الروايات",
        description: "Fluide et riche en émotions. أداء سلس طويل المدى، غني بالتعبير والعمق.",
    },
    VoiceField {
        id: "corporate",
        title: "Corporate / الشركات",
        description: "Professionnel et clair. صوت رسمي واضح للعروض المهنية.",
    },
];

pub fn find_field(id: &str) -> Option<&'static VoiceField> {
    VOICE_FIELDS.iter().find(|f| f.id == id)
}
