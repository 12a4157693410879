use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Tools,
    Analysis,
    Visualization,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Programming,
        SkillCategory::Tools,
        SkillCategory::Analysis,
        SkillCategory::Visualization,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Tools => "tools",
            SkillCategory::Analysis => "analysis",
            SkillCategory::Visualization => "visualization",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Programming => "Programming",
            SkillCategory::Tools => "Tools",
            SkillCategory::Analysis => "Analysis",
            SkillCategory::Visualization => "Visualization",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category key '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for SkillCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

/// Single-select filter over the skills grid. `All` is the default tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SkillCategory),
}

impl CategoryFilter {
    pub fn key(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Skills",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(self, category: SkillCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Filter tabs in display order.
    pub fn tabs() -> [CategoryFilter; 5] {
        [
            CategoryFilter::All,
            CategoryFilter::Only(SkillCategory::Programming),
            CategoryFilter::Only(SkillCategory::Tools),
            CategoryFilter::Only(SkillCategory::Analysis),
            CategoryFilter::Only(SkillCategory::Visualization),
        ]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    /// Percentage in `0..=100`.
    pub proficiency: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: SkillCategory, proficiency: u8) -> Self {
        Self {
            name: name.into(),
            category,
            proficiency: proficiency.min(100),
        }
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", self.proficiency)
    }

    pub fn tier(&self) -> ProficiencyTier {
        ProficiencyTier::from_proficiency(self.proficiency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyTier {
    Foundational,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyTier {
    pub fn from_proficiency(proficiency: u8) -> Self {
        match proficiency {
            90.. => ProficiencyTier::Expert,
            75..=89 => ProficiencyTier::Advanced,
            60..=74 => ProficiencyTier::Intermediate,
            _ => ProficiencyTier::Foundational,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProficiencyTier::Expert => "expert",
            ProficiencyTier::Advanced => "advanced",
            ProficiencyTier::Intermediate => "intermediate",
            ProficiencyTier::Foundational => "foundational",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProficiencyTier::Expert => "Expert level with extensive project experience",
            ProficiencyTier::Advanced => "Advanced proficiency with real-world applications",
            ProficiencyTier::Intermediate => "Intermediate level with growing expertise",
            ProficiencyTier::Foundational => "Foundational knowledge with hands-on practice",
        }
    }
}

/// Editable inputs of the contact form, keyed by their form input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Name,
    Email,
    Message,
    Honeypot,
}

impl FieldKey {
    pub const REQUIRED: [FieldKey; 3] = [FieldKey::Name, FieldKey::Email, FieldKey::Message];

    pub fn input_name(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Message => "message",
            FieldKey::Honeypot => "honeypot",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldKey {
    type Err = UnknownField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "name" => Ok(FieldKey::Name),
            "email" => Ok(FieldKey::Email),
            "message" => Ok(FieldKey::Message),
            "honeypot" => Ok(FieldKey::Honeypot),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
