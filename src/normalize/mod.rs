use std::collections::HashMap;

use tracing::{debug, warn};

use crate::io::sheet::Row;
use crate::model::{Condition, Deliverable, Expedition, ItemRef, Reward};

pub mod coerce;

/// Sheet holding one row per expedition with its scalar properties.
pub const PROPERTIES_SHEET: &str = "QuestProperties";
/// Sheet holding completion conditions, joined by expedition id.
pub const CONDITIONS_SHEET: &str = "QuestConditionsForCompletion";
/// Sheet holding turn-in deliverables, joined by expedition id.
pub const DELIVERABLES_SHEET: &str = "QuestDeliverables";
/// Sheet holding completion rewards, joined by expedition id.
pub const REWARDS_SHEET: &str = "QuestRewards";

/// 0-indexed header row shared by all expedition sheets; row 0 carries a
/// designer-facing banner.
pub const HEADER_ROW: usize = 1;

/// How rows missing a required text field are treated during pass 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Skip the row and report which field was missing.
    Strict,
    /// Accept the row, defaulting missing text fields to empty strings.
    Lenient,
}

/// Representation of an absent or unparsable quest-giver identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingNpcId {
    /// Emit `0`.
    Zero,
    /// Emit JSON `null`.
    Null,
}

/// Wire shape of deliverable and reward item identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIdFormat {
    /// Decimal strings, e.g. `"7"`.
    DecimalString,
    /// Native integers, e.g. `7`.
    Integer,
}

/// Configuration for one export run.
///
/// The two schema revisions observed in authored workbooks disagree on the
/// quest-giver column, the absent-NPC representation, required-field
/// validation, and item id serialization. Neither revision is authoritative,
/// so each axis is explicit here; [`ExportProfile`] bundles the two observed
/// combinations.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub validation: ValidationPolicy,
    /// Column supplying the quest-giver NPC identifier.
    pub npc_id_column: String,
    pub missing_npc_id: MissingNpcId,
    pub item_ids: ItemIdFormat,
    /// Header row offset forwarded to the sheet loader.
    pub header_row: usize,
}

/// Named option presets matching the two observed schema revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportProfile {
    /// Current revision: required text fields enforced, `questGiverNPCID`
    /// column, absent NPC ids become `0`, item ids are decimal strings.
    Strict,
    /// Legacy revision: missing text fields default to empty, `npcHeadId`
    /// column, absent NPC ids become `null`, item ids are native integers.
    Lenient,
}

impl ExportProfile {
    /// Expands the preset into a full option set.
    pub fn options(self) -> ExportOptions {
        match self {
            ExportProfile::Strict => ExportOptions {
                validation: ValidationPolicy::Strict,
                npc_id_column: "questGiverNPCID".to_string(),
                missing_npc_id: MissingNpcId::Zero,
                item_ids: ItemIdFormat::DecimalString,
                header_row: HEADER_ROW,
            },
            ExportProfile::Lenient => ExportOptions {
                validation: ValidationPolicy::Lenient,
                npc_id_column: "npcHeadId".to_string(),
                missing_npc_id: MissingNpcId::Null,
                item_ids: ItemIdFormat::Integer,
                header_row: HEADER_ROW,
            },
        }
    }
}

/// Tallies for one normalize run, surfaced in operator summaries. Rows whose
/// join-key cell is entirely blank are treated as sheet padding and are not
/// counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub expeditions: usize,
    pub skipped_properties: usize,
    pub skipped_conditions: usize,
    pub skipped_deliverables: usize,
    pub skipped_rewards: usize,
}

impl NormalizeReport {
    /// Total number of skipped rows across all four sheets.
    pub fn skipped_total(&self) -> usize {
        self.skipped_properties
            + self.skipped_conditions
            + self.skipped_deliverables
            + self.skipped_rewards
    }
}

/// Joins the four sheets into an ordered list of expedition records.
///
/// Pass 1 creates one record per Properties row; passes 2 through 4 append
/// conditions, deliverables, and rewards to the records they reference.
/// Output order follows first-seen Properties order, and each list follows
/// its source sheet's row order. No malformed row aborts the run.
pub fn normalize(
    props: &[Row],
    conditions: &[Row],
    deliverables: &[Row],
    rewards: &[Row],
    options: &ExportOptions,
) -> (Vec<Expedition>, NormalizeReport) {
    let mut expeditions: Vec<Expedition> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut report = NormalizeReport::default();

    collect_properties(props, options, &mut expeditions, &mut index, &mut report);
    collect_conditions(conditions, &index, &mut expeditions, &mut report);
    collect_deliverables(deliverables, options, &index, &mut expeditions, &mut report);
    collect_rewards(rewards, options, &index, &mut expeditions, &mut report);

    report.expeditions = expeditions.len();
    (expeditions, report)
}

fn collect_properties(
    rows: &[Row],
    options: &ExportOptions,
    expeditions: &mut Vec<Expedition>,
    index: &mut HashMap<String, usize>,
    report: &mut NormalizeReport,
) {
    for row in rows {
        let id = coerce::trimmed(row.get("id"));
        if id.is_empty() {
            continue;
        }
        if index.contains_key(&id) {
            warn!(
                sheet = PROPERTIES_SHEET,
                expedition = %id,
                "duplicate expedition id, keeping the first occurrence"
            );
            report.skipped_properties += 1;
            continue;
        }

        let display_name_key = coerce::trimmed(row.get("displayNameKey"));
        let description_key = coerce::trimmed(row.get("descriptionKey"));
        let category = coerce::trimmed(row.get("category"));

        if options.validation == ValidationPolicy::Strict {
            let missing = [
                ("displayNameKey", &display_name_key),
                ("descriptionKey", &description_key),
                ("category", &category),
            ]
            .into_iter()
            .find(|(_, value)| value.is_empty());
            if let Some((field, _)) = missing {
                warn!(
                    sheet = PROPERTIES_SHEET,
                    expedition = %id,
                    field,
                    "skipping expedition with a missing required field"
                );
                report.skipped_properties += 1;
                continue;
            }
        }

        // The tier id column is authoritative; older workbooks only carry
        // the unsuffixed name.
        let tier_cell = row.get("minProgressionTierID");
        let tier_cell = if tier_cell.is_blank() {
            row.get("minProgressionTier")
        } else {
            tier_cell
        };

        let quest_giver_npc_id = match coerce::opt_int(row.get(&options.npc_id_column)) {
            Some(value) => Some(value),
            None => match options.missing_npc_id {
                MissingNpcId::Zero => Some(0),
                MissingNpcId::Null => None,
            },
        };

        index.insert(id.clone(), expeditions.len());
        expeditions.push(Expedition {
            id,
            display_name_key,
            description_key,
            category,
            rarity: coerce::int_or(row.get("rarity"), 1),
            duration_ticks: coerce::int_or(row.get("durationTicks"), 1),
            difficulty: coerce::int_or(row.get("difficulty"), 1),
            min_progression_tier: coerce::int_or(tier_cell, 1).to_string(),
            is_repeatable: coerce::truthy(row.get("isRepeatable")),
            is_daily_eligible: coerce::truthy(row.get("isDailyEligible")),
            quest_giver_npc_id,
            prerequisites: Vec::new(),
            deliverables: Vec::new(),
            rewards: Vec::new(),
            daily_rewards: Vec::new(),
        });
    }
}

fn collect_conditions(
    rows: &[Row],
    index: &HashMap<String, usize>,
    expeditions: &mut [Expedition],
    report: &mut NormalizeReport,
) {
    for row in rows {
        let Some(slot) =
            resolve_expedition(row, CONDITIONS_SHEET, index, &mut report.skipped_conditions)
        else {
            continue;
        };

        let kind = coerce::trimmed(row.get("Type"));
        if kind.is_empty() {
            debug!(
                sheet = CONDITIONS_SHEET,
                expedition = %expeditions[slot].id,
                "skipping condition row without a type"
            );
            report.skipped_conditions += 1;
            continue;
        }
        let target = coerce::trimmed(row.get("target"));

        expeditions[slot].prerequisites.push(Condition {
            id: Condition::derive_id(&kind, &target),
            kind,
            target,
            required_count: coerce::int_or(row.get("requiredCount"), 0),
            description: coerce::trimmed(row.get("description")),
        });
    }
}

fn collect_deliverables(
    rows: &[Row],
    options: &ExportOptions,
    index: &HashMap<String, usize>,
    expeditions: &mut [Expedition],
    report: &mut NormalizeReport,
) {
    for row in rows {
        let Some(slot) = resolve_expedition(
            row,
            DELIVERABLES_SHEET,
            index,
            &mut report.skipped_deliverables,
        ) else {
            continue;
        };

        let Some(item) = resolve_item_id(row, "ItemId", DELIVERABLES_SHEET, expeditions, slot)
        else {
            report.skipped_deliverables += 1;
            continue;
        };

        expeditions[slot].deliverables.push(Deliverable {
            id: item_ref(item, options.item_ids),
            required_count: coerce::int_or(row.get("requiredCount"), 0),
            consumes_items: coerce::truthy(row.get("consumesItems")),
            description: coerce::trimmed(row.get("description")),
        });
    }
}

fn collect_rewards(
    rows: &[Row],
    options: &ExportOptions,
    index: &HashMap<String, usize>,
    expeditions: &mut [Expedition],
    report: &mut NormalizeReport,
) {
    for row in rows {
        let Some(slot) =
            resolve_expedition(row, REWARDS_SHEET, index, &mut report.skipped_rewards)
        else {
            continue;
        };

        let Some(item) = resolve_item_id(row, "itemId", REWARDS_SHEET, expeditions, slot) else {
            report.skipped_rewards += 1;
            continue;
        };

        let reward = Reward {
            id: item_ref(item, options.item_ids),
            min_stack: coerce::int_or(row.get("minStack"), 1),
            max_stack: coerce::int_or(row.get("maxStack"), 1),
            drop_chance: coerce::float_or(row.get("dropChance"), 1.0),
        };

        // The routing flag is input-only and is not retained on the record.
        if coerce::truthy(row.get("isDailyReward")) {
            expeditions[slot].daily_rewards.push(reward);
        } else {
            expeditions[slot].rewards.push(reward);
        }
    }
}

/// Resolves the expedition a join row belongs to. Rows with a blank id are
/// sheet padding and skip silently; rows naming an unknown expedition are
/// dropped by design and only tallied.
fn resolve_expedition(
    row: &Row,
    sheet: &'static str,
    index: &HashMap<String, usize>,
    skipped: &mut usize,
) -> Option<usize> {
    let expedition_id = coerce::trimmed(row.get("expeditionId"));
    if expedition_id.is_empty() {
        return None;
    }
    match index.get(&expedition_id) {
        Some(slot) => Some(*slot),
        None => {
            debug!(
                sheet,
                expedition = %expedition_id,
                "dropping row that references an unknown expedition"
            );
            *skipped += 1;
            None
        }
    }
}

/// Parses an item identity cell. Blank cells skip quietly; a present but
/// non-numeric value is reported, since the row clearly meant to name an item.
fn resolve_item_id(
    row: &Row,
    column: &str,
    sheet: &'static str,
    expeditions: &[Expedition],
    slot: usize,
) -> Option<i64> {
    let cell = row.get(column);
    if cell.is_blank() {
        debug!(
            sheet,
            expedition = %expeditions[slot].id,
            "skipping row with a blank item id"
        );
        return None;
    }
    let item = coerce::opt_int(cell);
    if item.is_none() {
        warn!(
            sheet,
            expedition = %expeditions[slot].id,
            "skipping row with a non-numeric item id"
        );
    }
    item
}

fn item_ref(value: i64, format: ItemIdFormat) -> ItemRef {
    match format {
        ItemIdFormat::DecimalString => ItemRef::Text(value.to_string()),
        ItemIdFormat::Integer => ItemRef::Numeric(value),
    }
}
