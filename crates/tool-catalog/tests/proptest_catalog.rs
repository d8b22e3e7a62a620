//! Property-based tests for filtering and comparison selection.

use proptest::prelude::*;

use tool_catalog::{filter, ComparisonSelection, FilterCriteria, ToolRecord};

fn dimension() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["X", "Y", "Z", ""]).prop_map(str::to_string)
}

fn criterion() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["all", "X", "Y", "Z"]).prop_map(str::to_string)
}

fn arb_records() -> impl Strategy<Value = Vec<ToolRecord>> {
    prop::collection::vec(
        (
            "[a-cA-C]{0,6}",
            "[a-c ]{0,10}",
            prop::collection::vec("[a-c]{1,3}", 0..3),
            dimension(),
            dimension(),
            dimension(),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, desc, tags, category, skill, pricing))| ToolRecord {
                id: format!("t{i}"),
                name,
                short_description: desc,
                tags,
                category,
                skill_level: skill,
                pricing_model: pricing,
                ..ToolRecord::default()
            })
            .collect::<Vec<_>>()
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (" ?[a-cA-C]{0,2} ?", criterion(), criterion(), criterion()).prop_map(
        |(query, category, skill, pricing)| {
            FilterCriteria::with_query(query)
                .category(category)
                .skill_level(skill)
                .pricing_model(pricing)
        },
    )
}

/// Reference predicate written out independently of the engine.
fn expected_match(r: &ToolRecord, criteria: &FilterCriteria) -> bool {
    let query = criteria.query.trim().to_lowercase();
    let text_hit = query.is_empty()
        || r.name.to_lowercase().contains(&query)
        || r.short_description.to_lowercase().contains(&query)
        || r.long_description.to_lowercase().contains(&query)
        || r.tags.iter().any(|t| t.to_lowercase().contains(&query));

    text_hit
        && (criteria.category == "all" || r.category == criteria.category)
        && (criteria.skill_level == "all" || r.skill_level == criteria.skill_level)
        && (criteria.pricing_model == "all" || r.pricing_model == criteria.pricing_model)
}

// --- Filter engine properties ---

proptest! {
    #[test]
    fn identity_criteria_return_everything(records in arb_records()) {
        let result = filter(&records, &FilterCriteria::default());
        let expected: Vec<&ToolRecord> = records.iter().collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn results_satisfy_every_active_dimension(records in arb_records(), criteria in arb_criteria()) {
        for r in filter(&records, &criteria) {
            prop_assert!(expected_match(r, &criteria));
        }
    }

    #[test]
    fn filter_preserves_input_order(records in arb_records(), criteria in arb_criteria()) {
        let positions: Vec<usize> = filter(&records, &criteria)
            .iter()
            .map(|r| records.iter().position(|x| x.id == r.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filter_returns_every_matching_record(records in arb_records(), criteria in arb_criteria()) {
        let mut expected: Vec<String> = records
            .iter()
            .filter(|r| expected_match(r, &criteria))
            .map(|r| r.id.clone())
            .collect();
        let mut actual: Vec<String> = filter(&records, &criteria)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }
}

// --- Comparison selection properties ---

proptest! {
    #[test]
    fn toggle_twice_is_involution(
        initial in prop::collection::vec("[a-e]", 0..6),
        id in "[a-e]",
    ) {
        let mut sel = ComparisonSelection::new();
        for i in &initial {
            sel.set_selected(i, true);
        }
        let mut before: Vec<String> = sel.ids().to_vec();

        sel.toggle(&id);
        sel.toggle(&id);

        let mut after: Vec<String> = sel.ids().to_vec();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn can_open_compare_tracks_size(ops in prop::collection::vec("[a-e]", 0..20)) {
        let mut sel = ComparisonSelection::new();
        for id in &ops {
            sel.toggle(id);
            prop_assert_eq!(sel.can_open_compare(), sel.len() >= 2);
        }
        sel.clear();
        prop_assert!(!sel.can_open_compare());
    }
}
