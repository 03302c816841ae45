//! Flattening GSUB lookups into input -> output rules

use std::collections::{BTreeSet, HashSet};

use write_fonts::{
    read::{
        tables::gsub::{
            AlternateSubstFormat1, LigatureSubstFormat1, MultipleSubstFormat1,
            ReverseChainSingleSubstFormat1, SingleSubst, SingleSubstFormat1, SingleSubstFormat2,
            SubstitutionLookup, SubstitutionSubtables,
        },
        ReadError,
    },
    types::GlyphId16,
};

use super::{
    gid16,
    layout::{visit_chain_context, visit_context},
    RawLookup, RawRule,
};
use crate::model::SubstitutionKind;

pub(super) fn read_lookup(lookup: &SubstitutionLookup) -> Result<RawLookup, ReadError> {
    let mut result = RawLookup::default();
    let mut nested = BTreeSet::new();
    // a glyph covered by an earlier subtable is never seen by a later one,
    // so we only take the first coverage hit in each lookup
    let mut seen = HashSet::new();

    match lookup.subtables()? {
        SubstitutionSubtables::Single(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                match sub? {
                    SingleSubst::Format1(sub) => append_single_f1(&sub, &mut seen, &mut result)?,
                    SingleSubst::Format2(sub) => append_single_f2(&sub, &mut seen, &mut result)?,
                }
            }
        }
        SubstitutionSubtables::Multiple(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                append_multiple(&sub?, &mut seen, &mut result)?;
            }
        }
        SubstitutionSubtables::Alternate(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                append_alternate(&sub?, &mut seen, &mut result)?;
            }
        }
        SubstitutionSubtables::Ligature(subs) => {
            let mut seen_sequences = HashSet::new();
            for sub in subs.iter() {
                result.subtables += 1;
                append_ligature(&sub?, &mut seen_sequences, &mut result)?;
            }
        }
        SubstitutionSubtables::Contextual(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                result.contextual_rules += visit_context(&sub?, &mut nested)?;
            }
        }
        SubstitutionSubtables::ChainContextual(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                result.contextual_rules += visit_chain_context(&sub?, &mut nested)?;
            }
        }
        SubstitutionSubtables::Reverse(subs) => {
            for sub in subs.iter() {
                result.subtables += 1;
                append_reverse(&sub?, &mut result)?;
            }
        }
    }
    result.nested = nested.into_iter().collect();
    Ok(result)
}

fn push_rule(
    result: &mut RawLookup,
    kind: SubstitutionKind,
    input: Vec<GlyphId16>,
    output: Vec<GlyphId16>,
) {
    result.rules.push(RawRule {
        kind,
        input,
        output,
    });
}

fn append_single_f1(
    subtable: &SingleSubstFormat1,
    seen: &mut HashSet<GlyphId16>,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    // addition is modulo 65536
    let delta = subtable.delta_glyph_id() as u16;
    for target in subtable.coverage()?.iter() {
        let target = gid16(target)?;
        if seen.insert(target) {
            let replacement = GlyphId16::new(target.to_u16().wrapping_add(delta));
            push_rule(result, SubstitutionKind::Single, vec![target], vec![replacement]);
        }
    }
    Ok(())
}

fn append_single_f2(
    subtable: &SingleSubstFormat2,
    seen: &mut HashSet<GlyphId16>,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    let coverage = subtable.coverage()?;
    for (target, replacement) in coverage.iter().zip(subtable.substitute_glyph_ids()) {
        let target = gid16(target)?;
        if seen.insert(target) {
            push_rule(
                result,
                SubstitutionKind::Single,
                vec![target],
                vec![replacement.get()],
            );
        }
    }
    Ok(())
}

fn append_multiple(
    subtable: &MultipleSubstFormat1,
    seen: &mut HashSet<GlyphId16>,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    let coverage = subtable.coverage()?;
    for (target, sequence) in coverage.iter().zip(subtable.sequences().iter()) {
        let target = gid16(target)?;
        let sequence = sequence?;
        if seen.insert(target) {
            let output = sequence
                .substitute_glyph_ids()
                .iter()
                .map(|gid| gid.get())
                .collect();
            push_rule(result, SubstitutionKind::Multiple, vec![target], output);
        }
    }
    Ok(())
}

fn append_alternate(
    subtable: &AlternateSubstFormat1,
    seen: &mut HashSet<GlyphId16>,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    let coverage = subtable.coverage()?;
    for (target, alternates) in coverage.iter().zip(subtable.alternate_sets().iter()) {
        let target = gid16(target)?;
        let alternates = alternates?;
        if seen.insert(target) {
            let output = alternates
                .alternate_glyph_ids()
                .iter()
                .map(|gid| gid.get())
                .collect();
            push_rule(result, SubstitutionKind::Alternate, vec![target], output);
        }
    }
    Ok(())
}

fn append_ligature(
    subtable: &LigatureSubstFormat1,
    seen: &mut HashSet<Vec<GlyphId16>>,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    let coverage = subtable.coverage()?;
    for (first, ligatures) in coverage.iter().zip(subtable.ligature_sets().iter()) {
        let first = gid16(first)?;
        for ligature in ligatures?.ligatures().iter() {
            let ligature = ligature?;
            let input = std::iter::once(first)
                .chain(ligature.component_glyph_ids().iter().map(|gid| gid.get()))
                .collect::<Vec<_>>();
            if seen.insert(input.clone()) {
                push_rule(
                    result,
                    SubstitutionKind::Ligature,
                    input,
                    vec![ligature.ligature_glyph()],
                );
            }
        }
    }
    Ok(())
}

fn append_reverse(
    subtable: &ReverseChainSingleSubstFormat1,
    result: &mut RawLookup,
) -> Result<(), ReadError> {
    let coverage = subtable.coverage()?;
    for (target, replacement) in coverage.iter().zip(subtable.substitute_glyph_ids()) {
        push_rule(
            result,
            SubstitutionKind::ReverseChain,
            vec![gid16(target)?],
            vec![replacement.get()],
        );
    }
    Ok(())
}
