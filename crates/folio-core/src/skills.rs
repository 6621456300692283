//! # Skills Module
//!
//! The static skill catalogue shown in the skills section.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub category: &'static str,
}

const fn skill(name: &'static str, category: &'static str) -> Skill {
    Skill { name, category }
}

pub const SKILLS: [Skill; 10] = [
    skill("JavaScript", "Frontend"),
    skill("PHP", "Backend"),
    skill("React", "Frontend"),
    skill("Laravel", "Backend"),
    skill("Vite", "Build Tools"),
    skill("MySQL", "Database"),
    skill("Tailwind", "CSS"),
    skill("Git", "Tools"),
    skill("Canva", "Design"),
    skill("Figma", "Design"),
];

/// Group skills by category. Categories sort alphabetically, skills keep
/// catalogue order.
#[must_use]
pub fn skills_by_category() -> BTreeMap<&'static str, Vec<&'static Skill>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static Skill>> = BTreeMap::new();
    for skill in &SKILLS {
        groups.entry(skill.category).or_default().push(skill);
    }
    groups
}
