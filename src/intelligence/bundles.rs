//! Role intelligence bundles.

use serde::{Deserialize, Serialize};

use crate::intelligence::schema::{SchemaError, Validate, clean_list, require_text};

/// One year of a career roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStage {
    pub year: String,
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// Five year career roadmap with the skills and certifications that matter locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub roadmap: Vec<RoadmapStage>,
    #[serde(default)]
    pub high_demand_skills: Vec<String>,
    #[serde(default)]
    pub local_certs: Vec<String>,
}

impl Validate for CareerPath {
    fn validate(self) -> Result<Self, SchemaError> {
        let roadmap = self
            .roadmap
            .into_iter()
            .filter(|stage| !stage.year.trim().is_empty())
            .map(|stage| RoadmapStage {
                year: stage.year.trim().to_string(),
                milestones: clean_list(stage.milestones),
            })
            .collect::<Vec<_>>();

        if roadmap.is_empty() {
            return Err(SchemaError::MissingField("roadmap"));
        }

        Ok(Self {
            roadmap,
            high_demand_skills: clean_list(self.high_demand_skills),
            local_certs: clean_list(self.local_certs),
        })
    }
}

/// Salary range. Values are formatted strings such as `$120k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBands {
    pub min: String,
    pub median: String,
    pub max: String,
}

/// Compensation intelligence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInsights {
    pub bands: SalaryBands,
    pub bonus_structure: String,
    pub col_adjustment: String,
    pub equity_insights: String,
}

impl Validate for SalaryInsights {
    fn validate(self) -> Result<Self, SchemaError> {
        Ok(Self {
            bands: SalaryBands {
                min: require_text("bands.min", self.bands.min)?,
                median: require_text("bands.median", self.bands.median)?,
                max: require_text("bands.max", self.bands.max)?,
            },
            bonus_structure: self.bonus_structure.trim().to_string(),
            col_adjustment: self.col_adjustment.trim().to_string(),
            equity_insights: self.equity_insights.trim().to_string(),
        })
    }
}

/// Ready-to-send outreach message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachScript {
    pub platform: String,
    pub content: String,
}

/// Where to meet people in the field, and what to say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkingIntel {
    #[serde(default)]
    pub hubs: Vec<String>,
    #[serde(default)]
    pub meetups: Vec<String>,
    #[serde(default)]
    pub conferences: Vec<String>,
    #[serde(default)]
    pub scripts: Vec<OutreachScript>,
}

impl Validate for NetworkingIntel {
    fn validate(self) -> Result<Self, SchemaError> {
        let scripts = self
            .scripts
            .into_iter()
            .filter_map(|script| {
                let content = script.content.trim();

                (!content.is_empty()).then(|| OutreachScript {
                    platform: script.platform.trim().to_string(),
                    content: content.to_string(),
                })
            })
            .collect();

        let intel = Self {
            hubs: clean_list(self.hubs),
            meetups: clean_list(self.meetups),
            conferences: clean_list(self.conferences),
            scripts,
        };

        if intel.hubs.is_empty()
            && intel.meetups.is_empty()
            && intel.conferences.is_empty()
            && intel.scripts.is_empty()
        {
            return Err(SchemaError::MissingField("hubs"));
        }

        Ok(intel)
    }
}

/// Deep dive on a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Masterclass {
    pub core_concept: String,
    pub why: String,
    #[serde(default)]
    pub technical_points: Vec<String>,
    #[serde(default)]
    pub insider_tip: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl Validate for Masterclass {
    fn validate(self) -> Result<Self, SchemaError> {
        Ok(Self {
            core_concept: require_text("coreConcept", self.core_concept)?,
            why: require_text("why", self.why)?,
            technical_points: clean_list(self.technical_points),
            insider_tip: self.insider_tip.trim().to_string(),
            red_flags: clean_list(self.red_flags),
        })
    }
}
