use chrono::{DateTime, Utc};
use epochguess::{normalize_one, rank, ranked_distances, EpochCatalog};
use proptest::prelude::*;

// Unix seconds between 1900 and 2200.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (-2_208_988_800i64..7_258_118_400i64).prop_map(|s| DateTime::from_timestamp(s, 0).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ranking_is_a_permutation(number in any::<i64>(), now in instant()) {
        let catalog = EpochCatalog::default_catalog();
        let ranked = rank(catalog, number, now);
        prop_assert_eq!(ranked.len(), catalog.len());
        let mut got: Vec<_> = ranked.names().collect();
        let mut want: Vec<_> = catalog.names().collect();
        got.sort_unstable();
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn distances_are_non_decreasing(number in any::<i64>(), now in instant()) {
        let ranked = ranked_distances(EpochCatalog::default_catalog(), number, now);
        prop_assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn ranking_ignores_insertion_order(number in any::<i64>(), now in instant(), shift in 0usize..12) {
        let catalog = EpochCatalog::default_catalog();
        let mut rotated = catalog.as_slice().to_vec();
        rotated.rotate_left(shift);
        prop_assert_eq!(rank(&rotated, number, now), rank(catalog, number, now));
    }

    #[test]
    fn exact_now_value_ranks_its_epoch_at_distance_zero(index in 0usize..12, now in instant()) {
        let catalog = EpochCatalog::default_catalog();
        let epoch = &catalog[index];
        let ranked = ranked_distances(catalog, epoch.seconds_since_start(now), now);
        prop_assert_eq!(ranked[0].distance, 0);
    }

    #[test]
    fn normalizing_never_panics(text in ".*") {
        let _ = normalize_one(&text);
    }

    #[test]
    fn integers_with_fractions_keep_the_integral_part(n in any::<i64>(), frac in "[0-9]{0,6}") {
        prop_assert_eq!(normalize_one(&format!(" {n}.{frac}\n")), Ok(n));
    }
}
