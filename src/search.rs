// Multi-facet tab search: tiered matching and ranking over one snapshot

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::settings::SearchFacets;
use crate::workspace::{FileRef, Leaf, LeafId};

/// Match quality, worst to best so derived Ord ranks Exact highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Subsequence,
    Substring,
    Prefix,
    Exact,
}

impl MatchTier {
    fn weight(self) -> i64 {
        match self {
            MatchTier::Exact => 4,
            MatchTier::Prefix => 3,
            MatchTier::Substring => 2,
            MatchTier::Subsequence => 1,
        }
    }
}

/// Which field produced the match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    Name,
    Path,
    Alias,
    Tag,
}

/// One ranked entry. `index` points into the snapshot the search ran over;
/// `spans` are char ranges (exclusive end) into the matched field's text,
/// for highlight rendering. `tier` is None for full-listing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    pub index: usize,
    pub id: LeafId,
    pub score: i64,
    pub matched_field: MatchedField,
    pub tier: Option<MatchTier>,
    pub spans: Vec<(usize, usize)>,
}

// Tier dominates, then shorter matched-field text, snapshot order last.
// Field lengths stay far below this, so tiers can never be outweighed.
const TIER_STRIDE: i64 = 1_000_000;

fn score_for(tier: MatchTier, field_chars: usize) -> i64 {
    tier.weight() * TIER_STRIDE + (TIER_STRIDE - field_chars as i64)
}

/// Rank the snapshot against `query`. Empty query lists every file-bound
/// leaf in snapshot order with a neutral score; otherwise each leaf is
/// matched field by field (basename, then path/alias/tag as the facets
/// allow) and the first matching field decides its tier, spans, and score.
/// File-less leaves never appear. Recomputed from scratch per call.
pub fn search(leaves: &[Leaf], query: &str, facets: &SearchFacets) -> Vec<RankedResult> {
    if query.is_empty() {
        return leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.bound_file().is_some())
            .map(|(index, leaf)| RankedResult {
                index,
                id: leaf.id,
                score: 0,
                matched_field: MatchedField::Name,
                tier: None,
                spans: Vec::new(),
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();
    let query_folded = fold_chars(query);

    let mut results: Vec<RankedResult> = leaves
        .iter()
        .enumerate()
        .filter_map(|(index, leaf)| {
            let file = leaf.bound_file()?;
            let (field, text, tier, spans) = match_leaf(file, &query_folded, facets, &matcher)?;
            Some(RankedResult {
                index,
                id: leaf.id,
                score: score_for(tier, text.chars().count()),
                matched_field: field,
                tier: Some(tier),
                spans,
            })
        })
        .collect();

    // Stable sort keeps snapshot order within equal scores
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

fn match_leaf<'a>(
    file: &'a FileRef,
    query: &[char],
    facets: &SearchFacets,
    matcher: &SkimMatcherV2,
) -> Option<(MatchedField, &'a str, MatchTier, Vec<(usize, usize)>)> {
    if let Some((tier, spans)) = match_text(&file.basename, query, matcher) {
        return Some((MatchedField::Name, file.basename.as_str(), tier, spans));
    }
    if facets.match_path {
        if let Some((tier, spans)) = match_text(&file.path, query, matcher) {
            return Some((MatchedField::Path, file.path.as_str(), tier, spans));
        }
    }
    if facets.match_alias {
        for alias in &file.aliases {
            if let Some((tier, spans)) = match_text(alias, query, matcher) {
                return Some((MatchedField::Alias, alias.as_str(), tier, spans));
            }
        }
    }
    if facets.match_tag {
        for tag in &file.tags {
            if let Some((tier, spans)) = match_text(tag, query, matcher) {
                return Some((MatchedField::Tag, tag.as_str(), tier, spans));
            }
        }
    }
    None
}

/// Case-insensitive match of an already-folded query against `text`.
/// Tries the tiers best first; the subsequence tier delegates to the skim
/// matcher and only uses its indices, never its score.
fn match_text(
    text: &str,
    query: &[char],
    matcher: &SkimMatcherV2,
) -> Option<(MatchTier, Vec<(usize, usize)>)> {
    let hay = fold_chars(text);

    if hay == query {
        return Some((MatchTier::Exact, vec![(0, hay.len())]));
    }
    if hay.len() >= query.len() && hay[..query.len()] == *query {
        return Some((MatchTier::Prefix, vec![(0, query.len())]));
    }
    if let Some(pos) = find_substring(&hay, query) {
        return Some((MatchTier::Substring, vec![(pos, pos + query.len())]));
    }

    let hay_str: String = hay.iter().collect();
    let query_str: String = query.iter().collect();
    matcher
        .fuzzy_indices(&hay_str, &query_str)
        .map(|(_, indices)| (MatchTier::Subsequence, merge_indices(&indices)))
}

/// Per-char lowercase fold. Taking the first folded char keeps indices
/// aligned 1:1 with the original string's chars, which the span contract
/// relies on.
fn fold_chars(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn find_substring(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    hay.windows(needle.len()).position(|w| w == needle)
}

/// Collapse matched char indices into contiguous (start, end) runs.
fn merge_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for &i in indices {
        match spans.last_mut() {
            Some((_, end)) if *end == i => *end += 1,
            _ => spans.push((i, i + 1)),
        }
    }
    spans
}
