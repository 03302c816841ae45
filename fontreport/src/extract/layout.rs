//! Features and substitution rules from a layout table

use std::collections::{BTreeMap, BTreeSet};

use write_fonts::types::{GlyphId16, Tag};

use crate::{
    error::Error,
    model::{FeatureRecord, LanguageSystem, LayoutTable, SubstitutionKind, SubstitutionRule},
    source::RawLayout,
};

/// The lookups reachable from `roots`, following contextual rules.
///
/// Lookups that (directly or not) invoke themselves are visited once.
fn reachable_lookups(layout: &RawLayout, roots: &[u16]) -> Result<BTreeSet<u16>, Error> {
    let mut seen = BTreeSet::new();
    let mut stack = roots.to_vec();
    while let Some(idx) = stack.pop() {
        let lookup = layout.lookup(idx)?;
        if seen.insert(idx) {
            stack.extend(lookup.nested.iter().copied());
        }
    }
    Ok(seen)
}

/// One record per (feature tag, language system), omitting features with no rules.
pub(super) fn feature_records(layout: &RawLayout) -> Result<Vec<FeatureRecord>, Error> {
    let mut merged = BTreeMap::<(Tag, LanguageSystem), BTreeSet<u16>>::new();
    for sys in &layout.lang_systems {
        for idx in sys.all_feature_indices() {
            let feature = layout.feature(idx)?;
            merged
                .entry((feature.tag, sys.lang_system()))
                .or_default()
                .extend(feature.lookups.iter().copied());
        }
    }

    let mut result = Vec::new();
    for ((tag, lang_system), lookups) in merged {
        let lookups = lookups.into_iter().collect::<Vec<_>>();
        let mut rule_count = 0;
        for idx in reachable_lookups(layout, &lookups)? {
            rule_count += layout.lookup(idx)?.rule_count(layout.table);
        }
        if rule_count == 0 {
            log::debug!(
                "skipping {} feature '{tag}' ({lang_system}) with no rules",
                layout.table
            );
            continue;
        }
        result.push(FeatureRecord {
            table: layout.table,
            tag,
            lang_system,
            lookups,
            rule_count,
        });
    }
    Ok(result)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RuleKey {
    feature: Option<Tag>,
    kind: SubstitutionKind,
    input: Vec<GlyphId16>,
    output: Vec<GlyphId16>,
}

/// Every rule of every lookup, attributed to the features that reach it.
pub(super) fn substitution_rules(layout: &RawLayout) -> Result<Vec<SubstitutionRule>, Error> {
    debug_assert_eq!(layout.table, LayoutTable::Gsub);

    // lookup -> feature tag -> language systems reaching it through that feature
    let mut owners = BTreeMap::<u16, BTreeMap<Tag, BTreeSet<LanguageSystem>>>::new();
    for (feature_idx, feature) in layout.features.iter().enumerate() {
        let systems = layout
            .lang_systems
            .iter()
            .filter(|sys| sys.all_feature_indices().any(|idx| idx as usize == feature_idx))
            .map(|sys| sys.lang_system())
            .collect::<BTreeSet<_>>();
        for lookup in reachable_lookups(layout, &feature.lookups)? {
            owners
                .entry(lookup)
                .or_default()
                .entry(feature.tag)
                .or_default()
                .extend(systems.iter().copied());
        }
    }

    let mut merged = BTreeMap::<RuleKey, (BTreeSet<u16>, BTreeSet<LanguageSystem>)>::new();
    for (lookup_idx, lookup) in layout.lookups.iter().enumerate() {
        let lookup_idx = lookup_idx as u16;
        let features = owners.get(&lookup_idx);
        if features.is_none() && !lookup.rules.is_empty() {
            log::debug!("GSUB lookup {lookup_idx} is not reachable from any feature");
        }
        for rule in &lookup.rules {
            let mut key = RuleKey {
                feature: None,
                kind: rule.kind,
                input: rule.input.clone(),
                output: rule.output.clone(),
            };
            let Some(features) = features else {
                merged.entry(key).or_default().0.insert(lookup_idx);
                continue;
            };
            for (tag, systems) in features {
                key.feature = Some(*tag);
                let (lookups, lang_systems) = merged.entry(key.clone()).or_default();
                lookups.insert(lookup_idx);
                lang_systems.extend(systems.iter().copied());
            }
        }
    }

    Ok(merged
        .into_iter()
        .map(|(key, (lookups, lang_systems))| SubstitutionRule {
            feature: key.feature,
            kind: key.kind,
            input: key.input,
            output: key.output,
            lookups: lookups.into_iter().collect(),
            lang_systems: lang_systems.into_iter().collect(),
        })
        .collect())
}
