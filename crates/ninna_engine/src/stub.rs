//! Deterministic stub story used when every provider fails.
//!
//! The stub is the floor of the text gateway: structurally complete,
//! localized for every allow-listed language, and scaled to the
//! requested duration so a degraded night still gets a full bedtime
//! story.

use ninna_core::{Language, StoryPayload};

/// Provider label recorded when the stub supplied the payload.
pub const STUB_PROVIDER: &str = "stub";

struct StubText {
    intro: &'static str,
    choice_1_prompt: &'static str,
    choice_1_options: [&'static str; 2],
    branch_1: &'static str,
    choice_2_prompt: &'static str,
    choice_2_options: [&'static str; 2],
    branch_2: &'static str,
    extra: &'static str,
    resolution: &'static str,
    moral_summary: &'static str,
    suggested_sequel_hook: &'static str,
}

fn text_for(language: Language) -> StubText {
    match language {
        Language::Italian => StubText {
            intro: "Ciao! Questa è una storia della buonanotte preparata con cura per te.",
            choice_1_prompt: "Vuoi seguire Pinocchio o la fata azzurra?",
            choice_1_options: ["Pinocchio", "Fata"],
            branch_1: "Pinocchio porta il bambino a scoprire un nuovo bosco pieno di lucciole.",
            choice_2_prompt: "Preferisci ascoltare una canzone o raccontare un sogno?",
            choice_2_options: ["Canzone", "Sogno"],
            branch_2: "La fata azzurra insegna al bambino il valore della gentilezza condividendo piccoli gesti d'amore.",
            extra: " Le lucciole danzano piano tra gli alberi, e ogni passo racconta un piccolo segreto del bosco.",
            resolution: "La serata termina con un abbraccio e un desiderio di sogni tranquilli.",
            moral_summary: "La gentilezza rende la notte più luminosa.",
            suggested_sequel_hook: "La prossima volta, esplorate il Carnevale di Venezia!",
        },
        Language::English => StubText {
            intro: "Hello! Here is a bedtime story prepared just for you.",
            choice_1_prompt: "Would you like to follow the little fox or the silver owl?",
            choice_1_options: ["Fox", "Owl"],
            branch_1: "The little fox leads the child through a quiet forest lit by fireflies.",
            choice_2_prompt: "Would you rather hear a song or share a dream?",
            choice_2_options: ["Song", "Dream"],
            branch_2: "The silver owl teaches the child how small acts of kindness warm the night.",
            extra: " The fireflies glow softly between the trees, and every step whispers a gentle secret.",
            resolution: "The evening ends with a hug and a wish for peaceful dreams.",
            moral_summary: "Kindness makes the night brighter.",
            suggested_sequel_hook: "Next time, visit the lighthouse by the sea!",
        },
        Language::Spanish => StubText {
            intro: "¡Hola! Aquí tienes un cuento para dormir preparado con cariño.",
            choice_1_prompt: "¿Quieres seguir al zorrito o a la lechuza plateada?",
            choice_1_options: ["Zorrito", "Lechuza"],
            branch_1: "El zorrito guía al niño por un bosque tranquilo lleno de luciérnagas.",
            choice_2_prompt: "¿Prefieres escuchar una canción o contar un sueño?",
            choice_2_options: ["Canción", "Sueño"],
            branch_2: "La lechuza plateada enseña al niño cómo los pequeños gestos de bondad abrigan la noche.",
            extra: " Las luciérnagas brillan entre los árboles y cada paso susurra un secreto amable.",
            resolution: "La noche termina con un abrazo y un deseo de sueños tranquilos.",
            moral_summary: "La bondad hace la noche más luminosa.",
            suggested_sequel_hook: "¡La próxima vez, visiten el faro junto al mar!",
        },
        Language::French => StubText {
            intro: "Bonsoir ! Voici une histoire du soir préparée rien que pour toi.",
            choice_1_prompt: "Veux-tu suivre le petit renard ou la chouette argentée ?",
            choice_1_options: ["Renard", "Chouette"],
            branch_1: "Le petit renard guide l'enfant dans une forêt paisible éclairée de lucioles.",
            choice_2_prompt: "Préfères-tu écouter une chanson ou raconter un rêve ?",
            choice_2_options: ["Chanson", "Rêve"],
            branch_2: "La chouette argentée montre à l'enfant comment les petits gestes gentils réchauffent la nuit.",
            extra: " Les lucioles dansent doucement entre les arbres, et chaque pas murmure un secret.",
            resolution: "La soirée se termine par un câlin et un souhait de doux rêves.",
            moral_summary: "La gentillesse rend la nuit plus lumineuse.",
            suggested_sequel_hook: "La prochaine fois, visitez le phare au bord de la mer !",
        },
        Language::Arabic => StubText {
            intro: "مرحباً! هذه قصة قبل النوم أُعدت خصيصاً لك.",
            choice_1_prompt: "هل تريد أن تتبع الثعلب الصغير أم البومة الفضية؟",
            choice_1_options: ["الثعلب", "البومة"],
            branch_1: "يقود الثعلب الصغير الطفل عبر غابة هادئة تضيئها اليراعات.",
            choice_2_prompt: "هل تفضل سماع أغنية أم رواية حلم؟",
            choice_2_options: ["أغنية", "حلم"],
            branch_2: "تعلّم البومة الفضية الطفل كيف تدفئ اللطف الصغيرة الليل.",
            extra: " تتراقص اليراعات بهدوء بين الأشجار، وكل خطوة تهمس بسر جميل.",
            resolution: "تنتهي الأمسية بعناق وأمنية بأحلام هادئة.",
            moral_summary: "اللطف يجعل الليل أكثر إشراقاً.",
            suggested_sequel_hook: "في المرة القادمة، زوروا المنارة قرب البحر!",
        },
    }
}

/// Build the stub story for a language and target duration.
///
/// Branch text grows with the duration: each minute past the shortest
/// supported story appends one more descriptive sentence, so a
/// ten-minute request still reads like a ten-minute story.
pub fn stub_story(language: Language, duration_minutes: u8) -> StoryPayload {
    let text = text_for(language);
    let extra_rounds = usize::from(duration_minutes.saturating_sub(5));

    let mut branch_1 = text.branch_1.to_string();
    let mut branch_2 = text.branch_2.to_string();
    for _ in 0..extra_rounds {
        branch_1.push_str(text.extra);
        branch_2.push_str(text.extra);
    }

    StoryPayload {
        intro: text.intro.to_string(),
        choice_1_prompt: text.choice_1_prompt.to_string(),
        choice_1_options: text.choice_1_options.iter().map(|s| s.to_string()).collect(),
        branch_1,
        choice_2_prompt: text.choice_2_prompt.to_string(),
        choice_2_options: text.choice_2_options.iter().map(|s| s.to_string()).collect(),
        branch_2,
        resolution: text.resolution.to_string(),
        moral_summary: text.moral_summary.to_string(),
        suggested_sequel_hook: Some(text.suggested_sequel_hook.to_string()),
        panel_prompts: vec![],
    }
}
