//! Static preset and quick-tag catalog.
//!
//! Loaded once at startup and never mutated. Preset prompts are sent to the
//! generator verbatim as the user instruction.

use makeupify_types::{Gender, Preset, PresetCategory, QuickTag};

const BOTH: &[Gender] = &[Gender::Female, Gender::Male];
const FEMALE: &[Gender] = &[Gender::Female];
const MALE: &[Gender] = &[Gender::Male];

pub static PRESETS: &[Preset] = &[
    Preset {
        id: "natural",
        label: "Natural Glow",
        prompt: "Apply a subtle, natural makeup look: light coverage foundation that evens skin \
                 tone, soft neutral eyeshadow, a touch of mascara and a sheer nude lip.",
        genders: FEMALE,
        category: PresetCategory::Style,
    },
    Preset {
        id: "glam",
        label: "Evening Glam",
        prompt: "Apply glamorous evening makeup: flawless full-coverage base, sculpted contour, \
                 shimmering smokey eyes, dramatic lashes and a bold red lip.",
        genders: FEMALE,
        category: PresetCategory::Style,
    },
    Preset {
        id: "gothic",
        label: "Gothic",
        prompt: "Apply gothic makeup: pale matte complexion, heavy black winged eyeliner, dark \
                 smoky eyes and a deep burgundy or black lip.",
        genders: BOTH,
        category: PresetCategory::Style,
    },
    Preset {
        id: "bridal",
        label: "Bridal",
        prompt: "Apply elegant bridal makeup: luminous long-wear base, soft rose-gold eyeshadow, \
                 defined lashes, gentle blush and a romantic pink lip.",
        genders: FEMALE,
        category: PresetCategory::Style,
    },
    Preset {
        id: "editorial",
        label: "Editorial",
        prompt: "Apply bold editorial makeup: graphic colored eyeliner, sharp highlights, \
                 sculpted cheekbones and an artistic high-fashion finish.",
        genders: BOTH,
        category: PresetCategory::Style,
    },
    Preset {
        id: "grooming",
        label: "Clean Grooming",
        prompt: "Apply subtle male grooming: even out skin tone, reduce shine, conceal dark \
                 circles and tidy the brows while keeping a natural masculine look.",
        genders: MALE,
        category: PresetCategory::Style,
    },
    Preset {
        id: "kpop",
        label: "K-Pop Idol",
        prompt: "Apply K-pop idol makeup: dewy glass-skin base, straight soft brows, shimmery \
                 aegyo-sal under the eyes and a gradient tinted lip.",
        genders: BOTH,
        category: PresetCategory::Style,
    },
    Preset {
        id: "punk",
        label: "Punk Rock",
        prompt: "Apply punk rock makeup: smudged black eyeliner, grungy dark eyeshadow and a \
                 bold dark lip with an edgy, rebellious attitude.",
        genders: BOTH,
        category: PresetCategory::Style,
    },
    Preset {
        id: "acne",
        label: "Clear Blemishes",
        prompt: "Retouch the skin: remove acne, blemishes and redness while keeping natural \
                 skin texture and pores. Do not change anything else.",
        genders: BOTH,
        category: PresetCategory::Retouch,
    },
    Preset {
        id: "wrinkle",
        label: "Soften Wrinkles",
        prompt: "Retouch the skin: gently soften fine lines and wrinkles for a refreshed look \
                 while keeping the person recognizable. Do not change anything else.",
        genders: BOTH,
        category: PresetCategory::Retouch,
    },
    Preset {
        id: "smooth",
        label: "Smooth Skin",
        prompt: "Retouch the skin: even out skin tone and smooth the complexion with a soft, \
                 healthy glow while keeping realistic texture. Do not change anything else.",
        genders: BOTH,
        category: PresetCategory::Retouch,
    },
];

pub static QUICK_TAGS: &[QuickTag] = &[
    QuickTag {
        id: "red_lipstick",
        label: "Red lipstick",
        value: "red lipstick",
    },
    QuickTag {
        id: "pink_blush",
        label: "Pink blush",
        value: "soft pink blush",
    },
    QuickTag {
        id: "cat_eye",
        label: "Cat eye",
        value: "winged cat-eye eyeliner",
    },
    QuickTag {
        id: "contour",
        label: "Contour",
        value: "sculpted contour",
    },
    QuickTag {
        id: "foundation",
        label: "Foundation",
        value: "flawless foundation",
    },
    QuickTag {
        id: "smokey_eye",
        label: "Smokey eye",
        value: "smokey eyes",
    },
    QuickTag {
        id: "highlighter",
        label: "Highlighter",
        value: "glowing highlighter",
    },
];

/// Look up a preset by id
#[must_use]
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Presets of one category that apply to `gender`, in catalog order
pub fn presets_for(
    gender: Gender,
    category: PresetCategory,
) -> impl Iterator<Item = &'static Preset> {
    PRESETS
        .iter()
        .filter(move |p| p.category == category && p.applies_to(gender))
}

/// All presets that apply to `gender`: styles first, then retouch
#[must_use]
pub fn presets_for_gender(gender: Gender) -> Vec<&'static Preset> {
    presets_for(gender, PresetCategory::Style)
        .chain(presets_for(gender, PresetCategory::Retouch))
        .collect()
}

#[must_use]
pub fn find_quick_tag(id: &str) -> Option<&'static QuickTag> {
    QUICK_TAGS.iter().find(|t| t.id == id)
}
