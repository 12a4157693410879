//! Bundled skills dataset rendered by the skills section.

use crate::domain::{Skill, SkillCategory};

const SKILLS: &[(&str, SkillCategory, u8)] = &[
    ("Python", SkillCategory::Programming, 90),
    ("SQL", SkillCategory::Programming, 88),
    ("R", SkillCategory::Programming, 72),
    ("JavaScript", SkillCategory::Programming, 65),
    ("Excel", SkillCategory::Tools, 92),
    ("Power BI", SkillCategory::Tools, 85),
    ("Tableau", SkillCategory::Tools, 78),
    ("Git", SkillCategory::Tools, 70),
    ("Jupyter", SkillCategory::Tools, 88),
    ("Statistical Analysis", SkillCategory::Analysis, 82),
    ("Data Cleaning", SkillCategory::Analysis, 91),
    ("Exploratory Data Analysis", SkillCategory::Analysis, 86),
    ("Machine Learning", SkillCategory::Analysis, 62),
    ("A/B Testing", SkillCategory::Analysis, 58),
    ("Matplotlib", SkillCategory::Visualization, 84),
    ("Seaborn", SkillCategory::Visualization, 80),
    ("Plotly", SkillCategory::Visualization, 68),
    ("Dashboard Design", SkillCategory::Visualization, 76),
];

pub fn portfolio_skills() -> Vec<Skill> {
    SKILLS
        .iter()
        .map(|&(name, category, proficiency)| Skill::new(name, category, proficiency))
        .collect()
}
