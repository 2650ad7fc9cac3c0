//! Response schemas sent with each request.

use serde_json::{Value, json};

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub(crate) fn questions() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "question": { "type": "STRING" },
                "category": {
                    "type": "STRING",
                    "enum": ["Technical", "Behavioral", "Case Study", "Cultural"]
                }
            },
            "required": ["id", "question", "category"]
        }
    })
}

pub(crate) fn career_path() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "year": { "type": "STRING" },
                        "milestones": string_list()
                    },
                    "required": ["year", "milestones"]
                }
            },
            "highDemandSkills": string_list(),
            "localCerts": string_list()
        },
        "required": ["roadmap", "highDemandSkills", "localCerts"]
    })
}

pub(crate) fn salary() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "bands": {
                "type": "OBJECT",
                "properties": {
                    "min": { "type": "STRING" },
                    "median": { "type": "STRING" },
                    "max": { "type": "STRING" }
                },
                "required": ["min", "median", "max"]
            },
            "bonusStructure": { "type": "STRING" },
            "colAdjustment": { "type": "STRING" },
            "equityInsights": { "type": "STRING" }
        },
        "required": ["bands", "bonusStructure", "colAdjustment", "equityInsights"]
    })
}

pub(crate) fn networking() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hubs": string_list(),
            "meetups": string_list(),
            "conferences": string_list(),
            "scripts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "platform": { "type": "STRING" },
                        "content": { "type": "STRING" }
                    },
                    "required": ["platform", "content"]
                }
            }
        },
        "required": ["hubs", "meetups", "conferences", "scripts"]
    })
}

pub(crate) fn masterclass() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "coreConcept": { "type": "STRING" },
            "why": { "type": "STRING" },
            "technicalPoints": string_list(),
            "insiderTip": { "type": "STRING" },
            "redFlags": string_list()
        },
        "required": ["coreConcept", "why", "technicalPoints", "insiderTip", "redFlags"]
    })
}

pub(crate) fn answer_evaluation() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "feedback": { "type": "STRING" },
            "score": { "type": "INTEGER" },
            "improvements": string_list(),
            "status": { "type": "STRING", "enum": ["pass", "fail"] }
        },
        "required": ["feedback", "score", "improvements", "status"]
    })
}

pub(crate) fn simulation_report() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "feedback": { "type": "STRING" },
            "strengths": string_list(),
            "improvements": string_list(),
            "redFlags": string_list()
        },
        "required": ["score", "feedback", "strengths", "improvements", "redFlags"]
    })
}
