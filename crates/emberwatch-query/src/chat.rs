//! Warden chat response shapes.
//!
//! The warden endpoint answers free-text questions either with plain text
//! or with a structured tactical plan. Field names follow the service's
//! JSON exactly (camelCase where it uses camelCase).

use serde::Deserialize;

/// Discriminator for the reply body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    /// Free-text answer; `plan` is absent.
    Text,
    /// Structured tactical plan attached in `plan`.
    Plan,
}

/// Projected impact of executing a tactical plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanImpact {
    /// Expected containment improvement (e.g. `"40% faster containment"`).
    pub containment: String,
    /// Estimated time to effect.
    pub eta: String,
    /// Estimated probability of success.
    #[serde(rename = "successProbability")]
    pub success_probability: String,
}

/// A structured tactical plan proposed by the warden.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TacticalPlan {
    /// Plan headline.
    pub title: String,
    /// Ordered action items.
    pub actions: Vec<String>,
    /// Projected impact summary.
    pub impact: PlanImpact,
}

/// One reply from the warden chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    /// Reply text shown in the conversation.
    pub content: String,
    /// Whether the reply carries a plan.
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    /// The plan, present when `kind` is [`ReplyKind::Plan`].
    #[serde(default)]
    pub plan: Option<TacticalPlan>,
}
