//! Script, feature and lookup lists shared by GSUB and GPOS

use std::collections::BTreeSet;

use write_fonts::{
    read::{
        tables::{
            gpos::{Gpos, PositionSubtables},
            gsub::Gsub,
            layout::{ChainedSequenceContext, FeatureList, LangSys, ScriptList, SequenceContext},
        },
        ReadError,
    },
    types::Tag,
};

use super::{gsub, RawFeature, RawLangSys, RawLayout, RawLookup};
use crate::model::{LayoutTable, DFLT_LANG};

pub(super) fn read_gsub(gsub: &Gsub) -> Result<RawLayout, ReadError> {
    let lookups = gsub
        .lookup_list()?
        .lookups()
        .iter()
        .map(|lookup| gsub::read_lookup(&lookup?))
        .collect::<Result<_, _>>()?;
    Ok(RawLayout {
        table: LayoutTable::Gsub,
        lang_systems: lang_systems(&gsub.script_list()?)?,
        features: features(&gsub.feature_list()?)?,
        lookups,
    })
}

pub(super) fn read_gpos(gpos: &Gpos) -> Result<RawLayout, ReadError> {
    let mut lookups = Vec::new();
    for lookup in gpos.lookup_list()?.lookups().iter() {
        let mut raw = RawLookup::default();
        let mut nested = BTreeSet::new();
        match lookup?.subtables()? {
            PositionSubtables::Contextual(subs) => {
                for sub in subs.iter() {
                    raw.subtables += 1;
                    raw.contextual_rules += visit_context(&sub?, &mut nested)?;
                }
            }
            PositionSubtables::ChainContextual(subs) => {
                for sub in subs.iter() {
                    raw.subtables += 1;
                    raw.contextual_rules += visit_chain_context(&sub?, &mut nested)?;
                }
            }
            PositionSubtables::Single(subs) => raw.subtables = subs.iter().count(),
            PositionSubtables::Pair(subs) => raw.subtables = subs.iter().count(),
            PositionSubtables::Cursive(subs) => raw.subtables = subs.iter().count(),
            PositionSubtables::MarkToBase(subs) => raw.subtables = subs.iter().count(),
            PositionSubtables::MarkToLig(subs) => raw.subtables = subs.iter().count(),
            PositionSubtables::MarkToMark(subs) => raw.subtables = subs.iter().count(),
        }
        raw.nested = nested.into_iter().collect();
        lookups.push(raw);
    }
    Ok(RawLayout {
        table: LayoutTable::Gpos,
        lang_systems: lang_systems(&gpos.script_list()?)?,
        features: features(&gpos.feature_list()?)?,
        lookups,
    })
}

/// Every (script, language) pair, the script's default language system first.
fn lang_systems(script_list: &ScriptList) -> Result<Vec<RawLangSys>, ReadError> {
    let data = script_list.offset_data();
    let mut result = Vec::new();
    for record in script_list.script_records() {
        let script_tag = record.script_tag();
        let script = record.script(data)?;
        if let Some(dflt) = script.default_lang_sys().transpose()? {
            result.push(raw_lang_sys(script_tag, DFLT_LANG, &dflt));
        }
        for lang_record in script.lang_sys_records() {
            let lang_sys = lang_record.lang_sys(script.offset_data())?;
            result.push(raw_lang_sys(
                script_tag,
                lang_record.lang_sys_tag(),
                &lang_sys,
            ));
        }
    }
    Ok(result)
}

fn raw_lang_sys(script: Tag, language: Tag, lang_sys: &LangSys) -> RawLangSys {
    let required = lang_sys.required_feature_index();
    RawLangSys {
        script,
        language,
        required_feature: (required != 0xFFFF).then_some(required),
        feature_indices: lang_sys
            .feature_indices()
            .iter()
            .map(|idx| idx.get())
            .collect(),
    }
}

fn features(feature_list: &FeatureList) -> Result<Vec<RawFeature>, ReadError> {
    let data = feature_list.offset_data();
    feature_list
        .feature_records()
        .iter()
        .map(|record| {
            let feature = record.feature(data)?;
            Ok(RawFeature {
                tag: record.feature_tag(),
                lookups: feature
                    .lookup_list_indices()
                    .iter()
                    .map(|idx| idx.get())
                    .collect(),
            })
        })
        .collect()
}

/// Record the lookups a contextual subtable invokes; returns its rule count.
pub(super) fn visit_context(
    context: &SequenceContext,
    nested: &mut BTreeSet<u16>,
) -> Result<usize, ReadError> {
    let mut rules = 0;
    match context {
        SequenceContext::Format1(table) => {
            for rule_set in table.seq_rule_sets().iter().flatten() {
                for rule in rule_set?.seq_rules().iter() {
                    let rule = rule?;
                    nested.extend(
                        rule.seq_lookup_records()
                            .iter()
                            .map(|rec| rec.lookup_list_index()),
                    );
                    rules += 1;
                }
            }
        }
        SequenceContext::Format2(table) => {
            for rule_set in table.class_seq_rule_sets().iter().flatten() {
                for rule in rule_set?.class_seq_rules().iter() {
                    let rule = rule?;
                    nested.extend(
                        rule.seq_lookup_records()
                            .iter()
                            .map(|rec| rec.lookup_list_index()),
                    );
                    rules += 1;
                }
            }
        }
        SequenceContext::Format3(table) => {
            nested.extend(
                table
                    .seq_lookup_records()
                    .iter()
                    .map(|rec| rec.lookup_list_index()),
            );
            rules += 1;
        }
    }
    Ok(rules)
}

/// As [`visit_context`], for chained contextual subtables.
pub(super) fn visit_chain_context(
    context: &ChainedSequenceContext,
    nested: &mut BTreeSet<u16>,
) -> Result<usize, ReadError> {
    let mut rules = 0;
    match context {
        ChainedSequenceContext::Format1(table) => {
            for rule_set in table.chained_seq_rule_sets().iter().flatten() {
                for rule in rule_set?.chained_seq_rules().iter() {
                    let rule = rule?;
                    nested.extend(
                        rule.seq_lookup_records()
                            .iter()
                            .map(|rec| rec.lookup_list_index()),
                    );
                    rules += 1;
                }
            }
        }
        ChainedSequenceContext::Format2(table) => {
            for rule_set in table.chained_class_seq_rule_sets().iter().flatten() {
                for rule in rule_set?.chained_class_seq_rules().iter() {
                    let rule = rule?;
                    nested.extend(
                        rule.seq_lookup_records()
                            .iter()
                            .map(|rec| rec.lookup_list_index()),
                    );
                    rules += 1;
                }
            }
        }
        ChainedSequenceContext::Format3(table) => {
            nested.extend(
                table
                    .seq_lookup_records()
                    .iter()
                    .map(|rec| rec.lookup_list_index()),
            );
            rules += 1;
        }
    }
    Ok(rules)
}
