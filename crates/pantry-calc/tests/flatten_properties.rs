use pantry_calc::{DishCatalog, RecipeFlattener};
use pantry_core::{Dish, PlanningConfig, RecipeLine, SubRecipe};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn lines_strategy() -> impl Strategy<Value = Vec<(u8, i64)>> {
    prop::collection::vec((0_u8..6, 0_i64..10_000), 0..24)
}

fn expected_totals(lines: &[(u8, i64)]) -> HashMap<String, Decimal> {
    let mut totals = HashMap::new();
    for (id, cents) in lines {
        *totals.entry(format!("I-{id}")).or_insert(Decimal::ZERO) += Decimal::new(*cents, 2);
    }
    totals
}

fn to_lines(lines: &[(u8, i64)]) -> Vec<RecipeLine> {
    lines
        .iter()
        .map(|(id, cents)| RecipeLine::ingredient(&format!("I-{id}"), "", Decimal::new(*cents, 2)))
        .collect()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn flatten_totals_are_order_independent(lines in lines_strategy(), seed in any::<u64>()) {
        let mut shuffled = lines.clone();
        // 確定性的洗牌
        let len = shuffled.len();
        if len > 1 {
            for i in 0..len {
                let j = ((seed.wrapping_mul(i as u64 + 1)) % len as u64) as usize;
                shuffled.swap(i, j);
            }
        }

        let config = PlanningConfig::default();
        let catalog = DishCatalog::new();
        let original = Dish::new("D".to_string(), String::new()).with_lines(to_lines(&lines));
        let reordered = Dish::new("D".to_string(), String::new()).with_lines(to_lines(&shuffled));

        let a = RecipeFlattener::flatten(&original, &catalog, &config).unwrap();
        let b = RecipeFlattener::flatten(&reordered, &catalog, &config).unwrap();
        let expected = expected_totals(&lines);

        prop_assert_eq!(a.len(), expected.len());
        for (id, total) in &expected {
            prop_assert_eq!(a.amount_of(id), *total);
            prop_assert_eq!(b.amount_of(id), *total);
        }
    }

    #[test]
    fn nesting_does_not_change_totals(lines in lines_strategy(), split in 0_usize..24) {
        let split = split.min(lines.len());
        let (outer, inner) = lines.split_at(split);

        let mut dish_lines = to_lines(outer);
        dish_lines.push(RecipeLine::sub_recipe(SubRecipe::inline(
            "SUB".to_string(),
            String::new(),
            to_lines(inner),
        )));
        let dish = Dish::new("D".to_string(), String::new()).with_lines(dish_lines);

        let flattened =
            RecipeFlattener::flatten(&dish, &DishCatalog::new(), &PlanningConfig::default()).unwrap();

        let expected = expected_totals(&lines);
        prop_assert_eq!(flattened.len(), expected.len());
        for (id, total) in expected {
            prop_assert_eq!(flattened.amount_of(&id), total);
        }
    }
}
