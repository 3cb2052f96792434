//! Comparator properties for browse and definition ranking.

use super::strategies::record_strategy;
use jiten::scoring::{browse_score, definition_score};
use jiten::{
    compare_for_browse, compare_for_definition_match, BrowseCandidate, BrowseWeights, DefinitionMatchData,
    DefinitionWeights, Inflection,
};
use proptest::prelude::*;
use std::cmp::Ordering;

fn inflections_strategy() -> impl Strategy<Value = Vec<Inflection>> {
    prop::collection::vec(
        prop::sample::select(vec![Inflection::Past, Inflection::Negative, Inflection::Polite]),
        0..3,
    )
}

fn match_data_strategy() -> impl Strategy<Value = DefinitionMatchData> {
    (0u32..30_000, 0usize..5, 0usize..20, 1usize..40, 1usize..120).prop_map(
        |(frequency, sense_index, offset, span, definition_length)| DefinitionMatchData {
            frequency,
            sense_index,
            offset,
            span,
            definition_length,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Same record, same inflections: the more frequent copy goes first.
    #[test]
    fn prop_browse_prefers_higher_frequency(
        record in record_strategy(),
        inflections in inflections_strategy(),
        low in 0u32..50_000,
        lead in 1u32..50_000,
    ) {
        let w = BrowseWeights::default();
        let rare = record.clone().with_frequency(low);
        let common = record.with_frequency(low + lead);
        let a = BrowseCandidate::new(&common, &inflections);
        let b = BrowseCandidate::new(&rare, &inflections);
        prop_assert_eq!(compare_for_browse(&a, &b, &w), Ordering::Less);
        prop_assert_eq!(compare_for_browse(&b, &a, &w), Ordering::Greater);
    }

    /// A decisive score lead wins whatever the tie-break terms say. The
    /// trailing record keeps its generated frequency (under 5000, so at most
    /// 50 points plus 38 in bonuses); the leader gets at least 160 points of
    /// frequency on top of it.
    #[test]
    fn prop_decisive_lead_ignores_tie_breaks(
        leader in record_strategy(),
        trailer in record_strategy(),
        lead in 16_000u32..100_000,
        il in inflections_strategy(),
        it in inflections_strategy(),
    ) {
        let w = BrowseWeights::default();
        let leader = leader.with_frequency(trailer.frequency() + lead);
        let gap = browse_score(&leader, &w) - browse_score(&trailer, &w);
        prop_assert!(gap > w.decisive_gap, "gap {} too small", gap);

        let a = BrowseCandidate::new(&leader, &il);
        let b = BrowseCandidate::new(&trailer, &it);
        prop_assert_eq!(compare_for_browse(&a, &b, &w), Ordering::Less);
        prop_assert_eq!(compare_for_browse(&b, &a, &w), Ordering::Greater);
    }

    /// Browse order is transitive, so sorting with it is well defined.
    #[test]
    fn prop_browse_is_transitive(
        records in prop::collection::vec(record_strategy(), 3),
        inflections in prop::collection::vec(inflections_strategy(), 3),
    ) {
        let w = BrowseWeights::default();
        let c: Vec<BrowseCandidate<'_>> = records
            .iter()
            .zip(&inflections)
            .map(|(r, i)| BrowseCandidate::new(r, i))
            .collect();
        let le = |x: usize, y: usize| compare_for_browse(&c[x], &c[y], &w) != Ordering::Greater;
        for (x, y, z) in [(0, 1, 2), (0, 2, 1), (1, 0, 2), (1, 2, 0), (2, 0, 1), (2, 1, 0)] {
            if le(x, y) && le(y, z) {
                prop_assert!(le(x, z));
            }
        }
    }

    /// The browse comparator is antisymmetric.
    #[test]
    fn prop_browse_is_antisymmetric(
        a in record_strategy(),
        b in record_strategy(),
        ia in inflections_strategy(),
        ib in inflections_strategy(),
    ) {
        let w = BrowseWeights::default();
        let (ca, cb) = (BrowseCandidate::new(&a, &ia), BrowseCandidate::new(&b, &ib));
        prop_assert_eq!(compare_for_browse(&ca, &cb, &w), compare_for_browse(&cb, &ca, &w).reverse());
    }

    /// Same match, different frequency: the more frequent word goes first.
    #[test]
    fn prop_definition_prefers_higher_frequency(data in match_data_strategy(), lead in 1u32..10_000) {
        let w = DefinitionWeights::default();
        let common = DefinitionMatchData { frequency: data.frequency + lead, ..data };
        prop_assert_eq!(compare_for_definition_match(&common, &data, &w), Ordering::Less);
        prop_assert!(definition_score(&common, &w) > definition_score(&data, &w));
    }

    /// Moving the match to a later sense never helps.
    #[test]
    fn prop_later_senses_never_rank_higher(data in match_data_strategy(), later in 1usize..5) {
        let w = DefinitionWeights::default();
        let moved = DefinitionMatchData { sense_index: data.sense_index + later, ..data };
        prop_assert_eq!(compare_for_definition_match(&data, &moved, &w), Ordering::Less);
    }
}
