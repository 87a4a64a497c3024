use serde::{Deserialize, Serialize};

/// Identifier assigned to an expedition. It mirrors the spreadsheet `id`
/// column and intentionally keeps the plain string representation for ease
/// of interoperability with the consuming game runtime.
pub type ExpeditionId = String;

/// Item identifier carried by deliverables and rewards.
///
/// The two schema revisions consumed in the wild disagree on the wire shape:
/// one expects decimal strings (`"7"`), the other native integers (`7`).
/// The untagged representation serializes each variant as its bare value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    /// Decimal-string item identifier.
    Text(String),
    /// Native integer item identifier.
    Numeric(i64),
}

/// A completion requirement attached to an expedition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Derived identifier, always `lowercase(type + "_" + target)`.
    pub id: String,
    /// Condition discriminator as authored in the sheet, e.g. `Kill`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Subject of the condition, e.g. a creature or biome name.
    pub target: String,
    pub required_count: i64,
    pub description: String,
}

impl Condition {
    /// Derives the stable condition identifier from its type and target.
    pub fn derive_id(kind: &str, target: &str) -> String {
        format!("{kind}_{target}").to_lowercase()
    }
}

/// An item the player must turn in while the expedition is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: ItemRef,
    pub required_count: i64,
    /// Whether the delivered items are consumed on turn-in.
    pub consumes_items: bool,
    pub description: String,
}

/// An item granted when the expedition completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: ItemRef,
    pub min_stack: i64,
    pub max_stack: i64,
    /// Drop chance between 0 and 1 for probabilistic rewards.
    pub drop_chance: f64,
}

/// A fully joined expedition record, one element of the exported JSON array.
///
/// Field declaration order is the wire order; the export relies on it for
/// byte-identical re-runs over an unchanged source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expedition {
    pub id: ExpeditionId,
    /// Localization key for the player-facing expedition name.
    pub display_name_key: String,
    /// Localization key for the descriptive flavor text.
    pub description_key: String,
    /// Categorical grouping for UI filtering and balance.
    pub category: String,
    pub rarity: i64,
    pub duration_ticks: i64,
    pub difficulty: i64,
    /// Minimum progression tier required to start, as a stringified integer.
    pub min_progression_tier: String,
    pub is_repeatable: bool,
    pub is_daily_eligible: bool,
    /// Identifier of the NPC offering the expedition. `None` serializes as
    /// JSON `null`; the zero-defaulting schema revision never produces it.
    pub quest_giver_npc_id: Option<i64>,
    pub prerequisites: Vec<Condition>,
    pub deliverables: Vec<Deliverable>,
    pub rewards: Vec<Reward>,
    pub daily_rewards: Vec<Reward>,
}
