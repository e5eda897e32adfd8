//! Project categories and the free-text import boundary.
//!
//! Persistence hands us whatever "type" string a project was created with.
//! `ProjectCategory::from_free_text` is the only place that string is
//! inspected; everything downstream dispatches on the enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Infrastructure sector a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Energy,
    Transport,
    Water,
    Telecommunications,
    Healthcare,
    Education,
    Housing,
    Agriculture,
    WasteManagement,
    Other,
}

/// Keyword table for mapping free text onto a category. First match wins.
const CATEGORY_KEYWORDS: &[(ProjectCategory, &[&str])] = &[
    (
        ProjectCategory::Energy,
        &["solar", "wind", "energy", "power", "hydro", "geothermal", "grid"],
    ),
    (
        ProjectCategory::Transport,
        &["transport", "road", "rail", "bridge", "port", "airport", "highway"],
    ),
    (
        ProjectCategory::WasteManagement,
        &["waste", "recycling", "landfill"],
    ),
    (
        ProjectCategory::Water,
        &["water", "sanitation", "desalination", "sewage"],
    ),
    (
        ProjectCategory::Telecommunications,
        &["telecom", "fiber", "fibre", "broadband", "tower", "data center"],
    ),
    (
        ProjectCategory::Healthcare,
        &["health", "hospital", "clinic", "medical"],
    ),
    (
        ProjectCategory::Education,
        &["education", "school", "university", "campus"],
    ),
    (
        ProjectCategory::Housing,
        &["housing", "residential", "real estate", "affordable homes"],
    ),
    (
        ProjectCategory::Agriculture,
        &["agri", "farm", "irrigation", "food", "storage silo"],
    ),
];

/// A UN Sustainable Development Goal a project contributes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgGoal {
    pub number: u8,
    pub name: String,
}

impl SdgGoal {
    fn new(number: u8, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
        }
    }
}

impl ProjectCategory {
    /// Maps a free-text project type onto a category (case-insensitive).
    pub fn from_free_text(text: &str) -> Self {
        let lowered = text.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(ProjectCategory::Other)
    }

    /// Stable tag used as a knowledge topic and in payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Energy => "energy",
            ProjectCategory::Transport => "transport",
            ProjectCategory::Water => "water",
            ProjectCategory::Telecommunications => "telecommunications",
            ProjectCategory::Healthcare => "healthcare",
            ProjectCategory::Education => "education",
            ProjectCategory::Housing => "housing",
            ProjectCategory::Agriculture => "agriculture",
            ProjectCategory::WasteManagement => "waste_management",
            ProjectCategory::Other => "other",
        }
    }

    /// SDG goals associated with the category.
    pub fn sdg_goals(&self) -> Vec<SdgGoal> {
        let goals: &[(u8, &str)] = match self {
            ProjectCategory::Energy => &[
                (7, "Affordable and Clean Energy"),
                (13, "Climate Action"),
            ],
            ProjectCategory::Transport => &[
                (9, "Industry, Innovation and Infrastructure"),
                (11, "Sustainable Cities and Communities"),
            ],
            ProjectCategory::Water => &[
                (6, "Clean Water and Sanitation"),
                (3, "Good Health and Well-being"),
            ],
            ProjectCategory::Telecommunications => &[
                (9, "Industry, Innovation and Infrastructure"),
                (4, "Quality Education"),
            ],
            ProjectCategory::Healthcare => &[(3, "Good Health and Well-being")],
            ProjectCategory::Education => &[(4, "Quality Education")],
            ProjectCategory::Housing => &[
                (11, "Sustainable Cities and Communities"),
                (1, "No Poverty"),
            ],
            ProjectCategory::Agriculture => &[
                (2, "Zero Hunger"),
                (15, "Life on Land"),
            ],
            ProjectCategory::WasteManagement => &[
                (12, "Responsible Consumption and Production"),
                (11, "Sustainable Cities and Communities"),
            ],
            ProjectCategory::Other => &[(9, "Industry, Innovation and Infrastructure")],
        };
        goals.iter().map(|(n, name)| SdgGoal::new(*n, name)).collect()
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
