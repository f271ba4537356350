//! 庫存扣減
//!
//! 記錄每日點單時，依菜餚配方計算消耗量並從庫存扣除（不低於 0）。
//! 扣減不是原子操作：單一菜餚或單一食材的問題只記錄下來，不影響同批其他項目。

use pantry_core::{DishOrder, InventoryItem, InventoryUpdate, KitchenError, PlanningConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::DishCatalog;
use crate::flatten::{FlattenedRecipe, RecipeFlattener};
use crate::matching::InventoryIndex;

/// 找不到對應庫存的消耗
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedIngredient {
    pub dish_id: String,
    pub ingredient_id: String,
    pub consumed: Decimal,
}

/// 無法展開的菜餚
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishFailure {
    pub dish_id: String,
    pub reason: String,
}

/// 寫入失敗的庫存項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteFailure {
    pub stock_item_id: String,
    pub reason: String,
}

/// 扣減計劃（尚未寫入）
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeductionPlan {
    /// 每個庫存項目一筆，依首次扣減順序
    pub updates: Vec<InventoryUpdate>,
    pub unresolved: Vec<UnresolvedIngredient>,
    /// 目錄中找不到的菜餚
    pub skipped_dishes: Vec<String>,
    pub failed_dishes: Vec<DishFailure>,
}

impl DeductionPlan {
    /// 是否所有消耗都找到對應庫存
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty() && self.skipped_dishes.is_empty() && self.failed_dishes.is_empty()
    }

    /// 指定庫存項目的扣減
    pub fn update_for(&self, stock_item_id: &str) -> Option<&InventoryUpdate> {
        self.updates
            .iter()
            .find(|update| update.stock_item_id == stock_item_id)
    }
}

/// 扣減執行結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeductionReport {
    pub plan: DeductionPlan,
    /// 已成功寫入的扣減
    pub applied: Vec<InventoryUpdate>,
    pub write_failures: Vec<WriteFailure>,
}

impl DeductionReport {
    pub fn new(plan: DeductionPlan) -> Self {
        Self {
            plan,
            applied: Vec::new(),
            write_failures: Vec::new(),
        }
    }

    /// 是否全部完成（無缺漏、無寫入失敗）
    pub fn is_complete(&self) -> bool {
        self.plan.is_fully_resolved() && self.write_failures.is_empty()
    }

    /// 有任何問題需要回報
    pub fn issue_count(&self) -> usize {
        self.plan.unresolved.len()
            + self.plan.skipped_dishes.len()
            + self.plan.failed_dishes.len()
            + self.write_failures.len()
    }
}

/// 庫存扣減引擎
pub struct DeductionEngine;

impl DeductionEngine {
    /// 計算點單對庫存的扣減
    ///
    /// 同批次中多道菜消耗同一食材時累計扣減（以批次內的結餘為基準），
    /// 每個庫存項目只輸出一筆更新。
    pub fn deduct(
        dish_orders: &[DishOrder],
        catalog: &DishCatalog,
        inventory: &[InventoryItem],
        config: &PlanningConfig,
    ) -> DeductionPlan {
        let index = InventoryIndex::new(inventory);
        let mut plan = DeductionPlan::default();
        // 庫存位置 → updates 索引
        let mut touched: HashMap<usize, usize> = HashMap::new();

        for line in dish_orders.iter().filter(|line| line.is_active()) {
            let Some(dish) = catalog.get(&line.dish_id) else {
                tracing::warn!("扣減時找不到菜餚 {}，略過", line.dish_id);
                plan.skipped_dishes.push(line.dish_id.clone());
                continue;
            };

            let recipe = match RecipeFlattener::flatten(dish, catalog, config) {
                Ok(recipe) => recipe,
                Err(e) => {
                    tracing::warn!("菜餚 {} 配方展開失敗: {}", dish.id, e);
                    plan.failed_dishes.push(DishFailure {
                        dish_id: dish.id.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // 先在副本上扣減，整道菜成功才寫回計劃
            let mut staged = plan.updates.clone();
            let mut staged_slots = touched.clone();
            match Self::consume_dish(
                &dish.id,
                &recipe,
                line.ordered_quantity,
                &index,
                inventory,
                &mut staged,
                &mut staged_slots,
            ) {
                Ok(unresolved) => {
                    for missing in &unresolved {
                        tracing::warn!(
                            "菜餚 {} 的食材 {} 不在庫存中",
                            dish.name,
                            missing.ingredient_id
                        );
                    }
                    plan.updates = staged;
                    touched = staged_slots;
                    plan.unresolved.extend(unresolved);
                }
                Err(e) => {
                    tracing::warn!("菜餚 {} 扣減失敗: {}", dish.id, e);
                    plan.failed_dishes.push(DishFailure {
                        dish_id: dish.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !config.emit_noop_updates {
            plan.updates
                .retain(|update| update.consumed > Decimal::ZERO);
        }

        tracing::debug!(
            "扣減計劃：更新 {} 筆，缺漏食材 {} 筆，略過菜餚 {} 道，失敗菜餚 {} 道",
            plan.updates.len(),
            plan.unresolved.len(),
            plan.skipped_dishes.len(),
            plan.failed_dishes.len()
        );

        plan
    }

    /// 單道菜的消耗；溢位時回傳錯誤，呼叫端捨棄這道菜的所有變更
    fn consume_dish(
        dish_id: &str,
        recipe: &FlattenedRecipe,
        ordered_quantity: u32,
        index: &InventoryIndex<'_>,
        inventory: &[InventoryItem],
        updates: &mut Vec<InventoryUpdate>,
        slots: &mut HashMap<usize, usize>,
    ) -> pantry_core::Result<Vec<UnresolvedIngredient>> {
        let portions = Decimal::from(ordered_quantity);
        let mut unresolved = Vec::new();

        for ingredient in recipe.iter() {
            let overflow = || KitchenError::QuantityOverflow {
                dish_id: dish_id.to_string(),
                ingredient_id: ingredient.ingredient_id.clone(),
            };
            let consumed = ingredient.amount.checked_mul(portions).ok_or_else(overflow)?;

            match index.position(&ingredient.ingredient_id) {
                Some(position) => {
                    let slot = *slots.entry(position).or_insert_with(|| {
                        updates.push(InventoryUpdate::from_item(&inventory[position]));
                        updates.len() - 1
                    });
                    updates[slot].consume(consumed).ok_or_else(overflow)?;
                }
                None => unresolved.push(UnresolvedIngredient {
                    dish_id: dish_id.to_string(),
                    ingredient_id: ingredient.ingredient_id.clone(),
                    consumed,
                }),
            }
        }

        Ok(unresolved)
    }
}
