//! Quest progression: accept, complete and abandon transitions plus the
//! read-only queries the UI filters with.
//!
//! Every transition checks all of its preconditions before touching the
//! character, so a failed call leaves the record unchanged.

use super::types::{QuestCatalog, QuestDefinition};
use crate::character::{Character, Rewards};
use crate::errors::QuestError;
use std::collections::HashSet;

/// Result of a successful [`accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// The quest was already active; nothing changed.
    AlreadyActive,
}

pub fn is_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.iter().any(|id| id == quest_id)
}

pub fn is_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.iter().any(|id| id == quest_id)
}

/// Checks the hard accept preconditions in order: catalog membership,
/// not yet completed, level, prerequisite.
fn check_accept<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
    quest_id: &str,
) -> Result<&'a QuestDefinition, QuestError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| QuestError::QuestNotFound(quest_id.to_string()))?;

    if is_completed(character, quest_id) {
        return Err(QuestError::QuestAlreadyCompleted(quest_id.to_string()));
    }

    if character.level < quest.required_level {
        return Err(QuestError::InsufficientLevel {
            quest_id: quest_id.to_string(),
            required: quest.required_level,
            current: character.level,
        });
    }

    if let Some(prerequisite) = quest.prerequisite.quest_id() {
        if !is_completed(character, prerequisite) {
            return Err(QuestError::QuestRequirementsNotMet {
                quest_id: quest_id.to_string(),
                prerequisite: prerequisite.to_string(),
            });
        }
    }

    Ok(quest)
}

/// Moves a quest into the character's active list.
///
/// Re-accepting an active quest is not an error and returns
/// [`AcceptOutcome::AlreadyActive`].
pub fn accept(
    character: &mut Character,
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<AcceptOutcome, QuestError> {
    let quest = check_accept(character, catalog, quest_id)?;

    if is_active(character, quest_id) {
        return Ok(AcceptOutcome::AlreadyActive);
    }

    character.active_quests.push(quest_id.to_string());
    log::info!("{} accepted quest '{}'", character.name, quest.title);
    Ok(AcceptOutcome::Accepted)
}

/// Completes an active quest and adds its rewards to the character's
/// experience and gold.
///
/// Experience is added raw; the level-up cascade is left to the caller.
pub fn complete(
    character: &mut Character,
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<Rewards, QuestError> {
    let quest = catalog
        .get(quest_id)
        .ok_or_else(|| QuestError::QuestNotFound(quest_id.to_string()))?;

    let position = character
        .active_quests
        .iter()
        .position(|id| id == quest_id)
        .ok_or_else(|| QuestError::QuestNotActive(quest_id.to_string()))?;

    character.active_quests.remove(position);
    character.completed_quests.push(quest_id.to_string());

    let rewards = Rewards {
        xp: quest.reward_xp,
        gold: quest.reward_gold,
    };
    character.experience = character.experience.saturating_add(rewards.xp);
    character.add_gold(rewards.gold);

    log::info!(
        "{} completed quest '{}' (+{} xp, +{} gold)",
        character.name,
        quest.title,
        rewards.xp,
        rewards.gold
    );
    Ok(rewards)
}

/// Drops an active quest without reward.
pub fn abandon(character: &mut Character, quest_id: &str) -> Result<(), QuestError> {
    let position = character
        .active_quests
        .iter()
        .position(|id| id == quest_id)
        .ok_or_else(|| QuestError::QuestNotActive(quest_id.to_string()))?;

    character.active_quests.remove(position);
    log::info!("{} abandoned quest '{}'", character.name, quest_id);
    Ok(())
}

/// Boolean form of [`accept`]'s rules, for filtering menus.
/// Quests that are already active are not acceptable.
pub fn can_accept(character: &Character, catalog: &QuestCatalog, quest_id: &str) -> bool {
    !is_active(character, quest_id) && check_accept(character, catalog, quest_id).is_ok()
}

/// Catalog quests the character could accept right now, in catalog order.
pub fn available_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    catalog
        .iter()
        .filter(|quest| can_accept(character, catalog, &quest.id))
        .collect()
}

pub fn active_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    character
        .active_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

pub fn completed_quests<'a>(
    character: &Character,
    catalog: &'a QuestCatalog,
) -> Vec<&'a QuestDefinition> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Quests whose required level falls within `min..=max`.
pub fn quests_by_level(catalog: &QuestCatalog, min: u32, max: u32) -> Vec<&QuestDefinition> {
    catalog
        .iter()
        .filter(|quest| (min..=max).contains(&quest.required_level))
        .collect()
}

/// Ids that must be completed to reach `quest_id`, earliest first and
/// ending with `quest_id` itself.
///
/// A cycle ends the walk at the first revisited id.
pub fn prerequisite_chain(
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<Vec<String>, QuestError> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(quest_id.to_string());

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            break;
        }
        let quest = catalog
            .get(&id)
            .ok_or_else(|| QuestError::QuestNotFound(id.clone()))?;
        current = quest.prerequisite.quest_id().map(str::to_string);
        chain.push(id);
    }

    chain.reverse();
    Ok(chain)
}

/// Percentage of the catalog the character has completed, 0 for an empty catalog.
pub fn completion_percentage(character: &Character, catalog: &QuestCatalog) -> f64 {
    if catalog.is_empty() {
        return 0.0;
    }
    let completed = completed_quests(character, catalog).len();
    completed as f64 / catalog.len() as f64 * 100.0
}

/// Sum of rewards over completed quests that are still in the catalog.
pub fn total_rewards_earned(character: &Character, catalog: &QuestCatalog) -> Rewards {
    completed_quests(character, catalog)
        .into_iter()
        .fold(Rewards::default(), |acc, quest| Rewards {
            xp: acc.xp.saturating_add(quest.reward_xp),
            gold: acc.gold.saturating_add(quest.reward_gold),
        })
}

/// Strict catalog check: every prerequisite must exist and no chain may loop.
pub fn validate_prerequisites(catalog: &QuestCatalog) -> Result<(), QuestError> {
    for quest in catalog.iter() {
        let mut visited = HashSet::new();
        let mut current = Some(quest);

        while let Some(q) = current {
            if !visited.insert(q.id.as_str()) {
                return Err(QuestError::PrerequisiteCycle(quest.id.clone()));
            }
            current = match q.prerequisite.quest_id() {
                None => None,
                Some(prerequisite) => Some(
                    catalog
                        .get(prerequisite)
                        .ok_or_else(|| QuestError::QuestNotFound(prerequisite.to_string()))?,
                ),
            };
        }
    }
    Ok(())
}
