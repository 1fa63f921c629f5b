//! Feature catalog: the fixed set of seven debate tools, defined once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::prompts::{
    CARD_CUTTER_SYSTEM, EXTEMP_SYSTEM, LAY_OPTIMIZATION_SYSTEM, PROCESS_FLOW_SYSTEM,
    REBUTTAL_SYSTEM, SPEECH_ANALYSIS_SYSTEM, STORAGE_SYSTEM,
};

/// Stable identifier of a debate tool. Serialized as its lowercase wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureId {
    Rebuttal,
    CardCutter,
    Storage,
    Extemp,
    WordChoice,
    SpeechAnalysis,
    ProcessFlow,
}

/// How the tool collects its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    Text,
    Url,
    File,
}

/// Everything needed to render a tool's tab and build its prompt.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureDescriptor {
    pub id: FeatureId,
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    /// Label used in the prompt header, e.g. "Rebuttal Generation".
    pub label: &'static str,
    pub system_prompt: &'static str,
    pub input_type: InputModality,
}

static CATALOG: [FeatureDescriptor; 7] = [
    FeatureDescriptor {
        id: FeatureId::Rebuttal,
        title: "Rebuttal Maker",
        description: "Generate strategic rebuttals based on your round strategy",
        placeholder: "Enter your round strategy, opponent arguments, and any specific points you want to address...",
        label: "Rebuttal Generation",
        system_prompt: REBUTTAL_SYSTEM,
        input_type: InputModality::Text,
    },
    FeatureDescriptor {
        id: FeatureId::CardCutter,
        title: "Card Cutter",
        description: "Extract and organize evidence from URLs and documents",
        placeholder: "https://example.com/article or paste your content...",
        label: "Card Cutting",
        system_prompt: CARD_CUTTER_SYSTEM,
        input_type: InputModality::Url,
    },
    FeatureDescriptor {
        id: FeatureId::Storage,
        title: "Organized Storage",
        description: "Manage and categorize your debate materials",
        placeholder: "Search your stored arguments, evidence, and strategies...",
        label: "Storage Organization",
        system_prompt: STORAGE_SYSTEM,
        input_type: InputModality::Text,
    },
    FeatureDescriptor {
        id: FeatureId::Extemp,
        title: "Extemp Prep",
        description: "Rapid preparation for extemporaneous speaking",
        placeholder: "Enter your extemp topic or question...",
        label: "Extemp Preparation",
        system_prompt: EXTEMP_SYSTEM,
        input_type: InputModality::Text,
    },
    FeatureDescriptor {
        id: FeatureId::WordChoice,
        title: "Word Choice for Lay",
        description: "Optimize language for lay judges and audiences",
        placeholder: "Paste your speech or argument to optimize for lay audiences...",
        label: "Lay Optimization",
        system_prompt: LAY_OPTIMIZATION_SYSTEM,
        input_type: InputModality::Text,
    },
    FeatureDescriptor {
        id: FeatureId::SpeechAnalysis,
        title: "Speech Analysis",
        description: "Get critiques on word efficiency and delivery",
        placeholder: "Upload your speech file or paste the transcript...",
        label: "Speech Analysis",
        system_prompt: SPEECH_ANALYSIS_SYSTEM,
        input_type: InputModality::File,
    },
    FeatureDescriptor {
        id: FeatureId::ProcessFlow,
        title: "Process Flows",
        description: "Get strategic advice for your debate rounds",
        placeholder: "Describe your current round situation, arguments made, and strategic concerns...",
        label: "Process Flow Analysis",
        system_prompt: PROCESS_FLOW_SYSTEM,
        input_type: InputModality::Text,
    },
];

/// All tools, in tab order.
pub fn catalog() -> &'static [FeatureDescriptor] {
    &CATALOG
}

impl FeatureId {
    pub const ALL: [FeatureId; 7] = [
        FeatureId::Rebuttal,
        FeatureId::CardCutter,
        FeatureId::Storage,
        FeatureId::Extemp,
        FeatureId::WordChoice,
        FeatureId::SpeechAnalysis,
        FeatureId::ProcessFlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureId::Rebuttal => "rebuttal",
            FeatureId::CardCutter => "cardcutter",
            FeatureId::Storage => "storage",
            FeatureId::Extemp => "extemp",
            FeatureId::WordChoice => "wordchoice",
            FeatureId::SpeechAnalysis => "speechanalysis",
            FeatureId::ProcessFlow => "processflow",
        }
    }

    pub fn descriptor(self) -> &'static FeatureDescriptor {
        // CATALOG is declared in the same order as the enum.
        &CATALOG[self as usize]
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for FeatureId {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_seven_features_in_tab_order() {
        let ids: Vec<FeatureId> = catalog().iter().map(|d| d.id).collect();
        assert_eq!(ids, FeatureId::ALL.to_vec());
    }

    #[test]
    fn test_descriptor_lookup_matches_id() {
        for id in FeatureId::ALL {
            assert_eq!(id.descriptor().id, id, "catalog out of order at {id}");
        }
    }

    #[test]
    fn test_feature_ids_are_unique() {
        let ids: HashSet<&str> = catalog().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_every_template_is_nonempty_and_numbered() {
        for d in catalog() {
            assert!(!d.system_prompt.trim().is_empty(), "{} has no template", d.id);
            assert!(d.system_prompt.contains("1. "), "{} template lacks steps", d.id);
            assert!(!d.title.is_empty() && !d.label.is_empty());
        }
    }

    #[test]
    fn test_input_modalities() {
        assert_eq!(FeatureId::CardCutter.descriptor().input_type, InputModality::Url);
        assert_eq!(FeatureId::SpeechAnalysis.descriptor().input_type, InputModality::File);
        assert_eq!(FeatureId::Rebuttal.descriptor().input_type, InputModality::Text);
    }

    #[test]
    fn test_from_str_round_trips_wire_ids() {
        for id in FeatureId::ALL {
            assert_eq!(id.as_str().parse::<FeatureId>().unwrap(), id);
        }
        assert_eq!("CardCutter".parse::<FeatureId>().unwrap(), FeatureId::CardCutter);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "debatebot".parse::<FeatureId>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown feature 'debatebot'");
    }

    #[test]
    fn test_serde_matches_wire_id() {
        for id in FeatureId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
