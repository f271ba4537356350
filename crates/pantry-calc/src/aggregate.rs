//! 需求彙總

use pantry_core::{DailyOrder, Dish, KitchenError, PlanningConfig};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::catalog::DishCatalog;
use crate::flatten::{FlattenedRecipe, RecipeFlattener};
use crate::requirements::RequirementMap;

/// 目錄中找不到菜餚而略過的點單行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDish {
    pub order_id: String,
    pub dish_id: String,
    pub ordered_quantity: u32,
}

/// 彙總結果
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub requirements: RequirementMap,
    pub skipped: Vec<SkippedDish>,
}

/// 需求彙總器
pub struct RequirementAggregator;

impl RequirementAggregator {
    /// 彙總多筆每日點單的食材需求
    ///
    /// 份數為 0 的行不計；目錄中找不到的菜餚略過並記錄。
    /// 每道菜只展開一次（並行），累加則依點單順序進行以保持輸出順序穩定。
    /// 用量溢位時回傳 `QuantityOverflow`。
    pub fn aggregate(
        orders: &[DailyOrder],
        catalog: &DishCatalog,
        config: &PlanningConfig,
    ) -> pantry_core::Result<Aggregation> {
        tracing::debug!(
            "開始彙總需求：點單 {} 筆，菜餚目錄 {} 道",
            orders.len(),
            catalog.len()
        );

        let flattened = Self::flatten_ordered_dishes(orders, catalog, config)?;

        let mut aggregation = Aggregation::default();
        for order in orders {
            for line in order.active_lines() {
                let Some(recipe) = flattened.get(line.dish_id.as_str()) else {
                    tracing::warn!(
                        "點單 {} 的菜餚 {} 不在目錄中，略過",
                        order.id,
                        line.dish_id
                    );
                    aggregation.skipped.push(SkippedDish {
                        order_id: order.id.clone(),
                        dish_id: line.dish_id.clone(),
                        ordered_quantity: line.ordered_quantity,
                    });
                    continue;
                };

                let portions = Decimal::from(line.ordered_quantity);
                for ingredient in recipe.iter() {
                    ingredient
                        .amount
                        .checked_mul(portions)
                        .and_then(|amount| {
                            aggregation
                                .requirements
                                .add(&ingredient.ingredient_id, amount)
                        })
                        .ok_or_else(|| KitchenError::QuantityOverflow {
                            dish_id: line.dish_id.clone(),
                            ingredient_id: ingredient.ingredient_id.clone(),
                        })?;
                }
            }
        }

        tracing::debug!(
            "需求彙總完成：{} 種食材，略過 {} 行",
            aggregation.requirements.len(),
            aggregation.skipped.len()
        );

        Ok(aggregation)
    }

    /// 展開點單中出現（且份數大於 0）的每道菜
    fn flatten_ordered_dishes<'a>(
        orders: &[DailyOrder],
        catalog: &'a DishCatalog,
        config: &PlanningConfig,
    ) -> pantry_core::Result<HashMap<&'a str, FlattenedRecipe>> {
        let mut seen = HashSet::new();
        let dishes: Vec<&'a Dish> = orders
            .iter()
            .flat_map(|order| order.active_lines())
            .filter_map(|line| catalog.get(&line.dish_id))
            .filter(|dish| seen.insert(dish.id.as_str()))
            .collect();

        dishes
            .par_iter()
            .map(|dish| {
                RecipeFlattener::flatten(*dish, catalog, config)
                    .map(|recipe| (dish.id.as_str(), recipe))
            })
            .collect()
    }
}
