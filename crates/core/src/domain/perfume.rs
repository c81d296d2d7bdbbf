use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PerfumeId(pub u64);

impl std::fmt::Display for PerfumeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AromaTagId(pub u64);

lenient_category! {
    /// How long a fragrance stays perceptible on skin.
    Longevity {
        Light => "Light",
        Medium => "Medium",
        Long => "Long",
        VeryLong => "Very Long",
    } else Other(String)
}

lenient_category! {
    /// Trail strength of a fragrance.
    Sillage {
        Light => "Light",
        Medium => "Medium",
        Heavy => "Heavy",
        VeryHeavy => "Very Heavy",
    } else Other(String)
}

impl Longevity {
    pub fn is_long_lasting(&self) -> bool {
        matches!(self, Longevity::Long | Longevity::VeryLong)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Top,
    Middle,
    Base,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub kind: NoteKind,
    pub name: String,
    /// 1..=10
    pub intensity: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AromaTag {
    pub id: AromaTagId,
    pub slug: String,
    pub name: String,
}

impl AromaTag {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.slug.trim().is_empty() {
            return Err(DomainError::validation("slug", "aroma tag slug must not be empty"));
        }
        if self.slug.chars().any(|ch| ch.is_whitespace() || ch.is_ascii_uppercase()) {
            return Err(DomainError::validation(
                "slug",
                format!("aroma tag slug `{}` must be lowercase without whitespace", self.slug),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "aroma tag name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Perfume {
    pub id: PerfumeId,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub concentration: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub longevity: Longevity,
    #[serde(default)]
    pub sillage: Sillage,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub aroma_tags: Vec<AromaTag>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Perfume {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "perfume name must not be empty"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("brand", "perfume brand must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price",
                format!("price must be a non-negative number, got {}", self.price),
            ));
        }
        if let Some(note) = self.notes.iter().find(|note| !(1..=10).contains(&note.intensity)) {
            return Err(DomainError::validation(
                "notes",
                format!("note `{}` has intensity {} outside 1..=10", note.name, note.intensity),
            ));
        }
        Ok(())
    }

    /// Lowercased aroma tag names, the key space used by profile matching.
    pub fn aroma_names(&self) -> HashSet<String> {
        self.aroma_tags.iter().map(|tag| tag.name.to_lowercase()).collect()
    }

    pub fn has_aroma_slug(&self, slug: &str) -> bool {
        self.aroma_tags.iter().any(|tag| tag.slug == slug)
    }

    pub fn description_mentions_any(&self, keywords: &[&str]) -> bool {
        let description = self.description.to_lowercase();
        keywords.iter().any(|keyword| description.contains(keyword))
    }

    pub fn brand_mentions_any(&self, keywords: &[&str]) -> bool {
        let brand = self.brand.to_lowercase();
        keywords.iter().any(|keyword| brand.contains(keyword))
    }
}
