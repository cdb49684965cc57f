//! Mapping token-classification records to entity mentions.
//!
//! Grouped records map one-to-one. Token-level records (`B-ORG`, `I-ORG`,
//! `##` word pieces) are merged first so that one real-world entity yields
//! one mention. Surface forms are always sliced from the original text.

use pulse_core::EntityMention;
use tracing::debug;

use crate::wire::RawEntity;

/// Character offset to byte offset table for one text.
struct CharOffsets {
    bytes: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bytes.push(text.len());
        Self { bytes }
    }

    fn byte(&self, char_offset: usize) -> Option<usize> {
        self.bytes.get(char_offset).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Begin,
    Inside,
}

/// Split `B-ORG` into `(Begin, "ORG")`. Returns `None` for the outside tag.
fn parse_tag(tag: &str) -> Option<(Tag, &str)> {
    if tag == "O" || tag.is_empty() {
        return None;
    }
    if let Some(category) = tag.strip_prefix("B-") {
        return Some((Tag::Begin, category));
    }
    if let Some(category) = tag.strip_prefix("I-") {
        return Some((Tag::Inside, category));
    }
    Some((Tag::Inside, tag))
}

/// Byte span of one record in `text`.
///
/// Uses the reported character offsets when present, otherwise searches
/// for the word after `cursor`.
fn locate(text: &str, offsets: &CharOffsets, raw: &RawEntity, cursor: usize) -> Option<(usize, usize)> {
    if let (Some(start), Some(end)) = (raw.start, raw.end) {
        let (start, end) = (offsets.byte(start)?, offsets.byte(end)?);
        return (start < end).then_some((start, end));
    }

    let word = raw.word.trim().trim_start_matches("##");
    if word.is_empty() {
        return None;
    }
    let from = cursor.min(text.len());
    text.get(from..)?
        .find(word)
        .map(|pos| (from + pos, from + pos + word.len()))
}

struct Group {
    category: String,
    start: usize,
    end: usize,
    last_index: Option<usize>,
    scores: Vec<f32>,
}

impl Group {
    fn into_mention(self, text: &str) -> Option<EntityMention> {
        let surface = text.get(self.start..self.end)?.to_string();
        let confidence = self.scores.iter().sum::<f32>() / self.scores.len().max(1) as f32;
        Some(EntityMention {
            surface_form: surface,
            category: self.category,
            confidence,
            start: self.start,
            end: self.end,
        })
    }

    fn open(category: &str, start: usize, end: usize, raw: &RawEntity) -> Self {
        Self {
            category: category.to_string(),
            start,
            end,
            last_index: raw.index,
            scores: vec![raw.score],
        }
    }

    fn extend(&mut self, end: usize, raw: &RawEntity) {
        self.end = self.end.max(end);
        self.last_index = raw.index;
        self.scores.push(raw.score);
    }
}

/// Whether a token-level record extends the current group.
fn continues(group: &Group, raw: &RawEntity, tag: Tag, category: &str) -> bool {
    if raw.word.starts_with("##") {
        return true;
    }
    if tag != Tag::Inside || group.category != category {
        return false;
    }
    match (group.last_index, raw.index) {
        (Some(last), Some(index)) => index == last + 1,
        _ => true,
    }
}

/// Whether a grouped record is the tail of a word split by the aggregator.
///
/// Simple aggregation starts a new group at every `B-` sub-token, so one word
/// can arrive as `Jio` + `##Cinema`. A piece marker or a same-category span
/// starting exactly where the group ends joins the group.
fn joins(group: &Group, raw: &RawEntity, category: &str, start: usize) -> bool {
    raw.word.starts_with("##") || (group.category == category && start == group.end)
}

/// Convert raw records into mentions in reading order.
pub fn group_entities(text: &str, raw: Vec<RawEntity>) -> Vec<EntityMention> {
    let offsets = CharOffsets::new(text);
    let mut mentions = Vec::new();
    let mut current: Option<Group> = None;
    let mut cursor = 0;

    for record in raw {
        let Some((start, end)) = locate(text, &offsets, &record, cursor) else {
            debug!(word = %record.word, "Skipping entity that does not map onto the text");
            continue;
        };
        cursor = end;

        let (category, extends) = if let Some(category) = record.entity_group.as_deref() {
            let extends = current
                .as_ref()
                .is_some_and(|group| joins(group, &record, category, start));
            (category, extends)
        } else if let Some((tag, category)) = record.entity.as_deref().and_then(parse_tag) {
            let extends = current
                .as_ref()
                .is_some_and(|group| continues(group, &record, tag, category));
            (category, extends)
        } else {
            if let Some(group) = current.take() {
                mentions.extend(group.into_mention(text));
            }
            continue;
        };

        if let (true, Some(group)) = (extends, current.as_mut()) {
            group.extend(end, &record);
            continue;
        }

        if let Some(group) = current.replace(Group::open(category, start, end, &record)) {
            mentions.extend(group.into_mention(text));
        }
    }

    if let Some(group) = current {
        mentions.extend(group.into_mention(text));
    }

    mentions
}
