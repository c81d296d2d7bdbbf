//! Personality archetypes derived from quiz answers

use crate::domain::quiz::QuizPreferences;

use super::types::{PersonalityAnalysis, PersonalityType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    RomanticElegant,
    AdventurousExplorer,
    ModernProfessional,
    CreativeSoul,
    NaturalSpirit,
    CharismaticSocialite,
}

struct ArchetypeProfile {
    label: &'static str,
    traits: [&'static str; 3],
    description: &'static str,
    best_notes: [&'static str; 4],
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::RomanticElegant,
        Archetype::AdventurousExplorer,
        Archetype::ModernProfessional,
        Archetype::CreativeSoul,
        Archetype::NaturalSpirit,
        Archetype::CharismaticSocialite,
    ];

    fn profile(self) -> &'static ArchetypeProfile {
        match self {
            Archetype::RomanticElegant => &ArchetypeProfile {
                label: "Romantic Elegant",
                traits: ["Sophisticated", "Charming", "Timeless"],
                description:
                    "You appreciate classic, romantic fragrances that exude elegance and grace.",
                best_notes: ["Rose", "Jasmine", "Vanilla", "Amber"],
            },
            Archetype::AdventurousExplorer => &ArchetypeProfile {
                label: "Adventurous Explorer",
                traits: ["Bold", "Curious", "Free-spirited"],
                description:
                    "You love unique, unconventional scents that tell a story and make a statement.",
                best_notes: ["Leather", "Incense", "Oud", "Spices"],
            },
            Archetype::ModernProfessional => &ArchetypeProfile {
                label: "Modern Professional",
                traits: ["Confident", "Sophisticated", "Ambitious"],
                description:
                    "You prefer clean, contemporary fragrances that project success and refinement.",
                best_notes: ["Citrus", "Vetiver", "Sandalwood", "Musk"],
            },
            Archetype::CreativeSoul => &ArchetypeProfile {
                label: "Creative Soul",
                traits: ["Artistic", "Expressive", "Unique"],
                description: "You're drawn to artistic, complex compositions that inspire creativity and individuality.",
                best_notes: ["Patchouli", "Incense", "Unusual Florals", "Gourmand"],
            },
            Archetype::NaturalSpirit => &ArchetypeProfile {
                label: "Natural Spirit",
                traits: ["Grounded", "Authentic", "Harmonious"],
                description: "You love earthy, natural scents that connect you to nature and create a sense of peace.",
                best_notes: ["Green Notes", "Woods", "Herbs", "Earth"],
            },
            Archetype::CharismaticSocialite => &ArchetypeProfile {
                label: "Charismatic Socialite",
                traits: ["Magnetic", "Energetic", "Sociable"],
                description: "You enjoy bright, alluring fragrances that make you memorable and draw people in.",
                best_notes: ["Fruits", "Florals", "Sweet Notes", "Spices"],
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn traits(self) -> &'static [&'static str] {
        &self.profile().traits
    }
}

type Rule = (fn(&QuizPreferences) -> bool, Archetype);

/// Evaluated in order; the first matching predicate decides the archetype even when a later
/// rule would also match.
const RULES: &[Rule] = &[
    (|p| p.floral_romantic && p.sweet_gourmand, Archetype::RomanticElegant),
    (|p| p.warm_spicy && p.unique, Archetype::AdventurousExplorer),
    (|p| p.citrus_energizing && p.work, Archetype::ModernProfessional),
    (|p| p.woody_earthy && p.unique, Archetype::CreativeSoul),
    (|p| p.light_fresh && p.daily_wear, Archetype::NaturalSpirit),
];

const FALLBACK: Archetype = Archetype::CharismaticSocialite;

pub fn classify(preferences: &QuizPreferences) -> Archetype {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(preferences))
        .map(|(_, archetype)| *archetype)
        .unwrap_or(FALLBACK)
}

pub fn analyze(preferences: &QuizPreferences) -> PersonalityAnalysis {
    let archetype = classify(preferences);
    let profile = archetype.profile();
    let key_traits: Vec<String> = profile.traits.iter().map(|t| (*t).to_owned()).collect();

    PersonalityAnalysis {
        scent_personality: profile.label.to_owned(),
        recommendation_style: format!(
            "Based on your {} personality, we recommend fragrances that reflect your {} nature.",
            profile.label,
            key_traits.join(", ").to_lowercase()
        ),
        key_traits,
        style_description: profile.description.to_owned(),
    }
}

/// Directory of every archetype, in rule order with the fallback last.
pub fn personality_types() -> Vec<PersonalityType> {
    Archetype::ALL
        .iter()
        .map(|archetype| {
            let profile = archetype.profile();
            PersonalityType {
                label: profile.label.to_owned(),
                traits: profile.traits.iter().map(|t| (*t).to_owned()).collect(),
                description: profile.description.to_owned(),
                best_notes: profile.best_notes.iter().map(|n| (*n).to_owned()).collect(),
            }
        })
        .collect()
}
