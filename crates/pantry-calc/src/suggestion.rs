//! 採購建議

use pantry_core::{InventoryItem, OrderSuggestion, PlanningConfig};
use rust_decimal::Decimal;

use crate::matching::InventoryIndex;
use crate::requirements::RequirementMap;

/// 採購建議引擎
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// 依需求與庫存快照計算採購建議
    ///
    /// 目標庫存 = max(最低庫存量, 需求量)；現有庫存低於目標時建議補足差額。
    /// 找不到庫存的食材全數採購。輸出順序與需求表相同。
    pub fn suggest(
        requirements: &RequirementMap,
        inventory: &[InventoryItem],
        config: &PlanningConfig,
    ) -> Vec<OrderSuggestion> {
        let index = InventoryIndex::new(inventory);
        let mut suggestions = Vec::new();

        for (ingredient_id, required) in requirements.iter() {
            let suggestion = match index.find(ingredient_id) {
                Some(item) => {
                    let to_order = Self::order_quantity(item, required);
                    OrderSuggestion::for_item(
                        ingredient_id.to_string(),
                        item,
                        required,
                        to_order,
                        &config.default_unit,
                    )
                }
                None => {
                    tracing::warn!("食材 {} 找不到對應庫存，建議全數採購", ingredient_id);
                    OrderSuggestion::unresolved(
                        ingredient_id.to_string(),
                        config.placeholder_name(ingredient_id),
                        required,
                        &config.default_unit,
                    )
                }
            };

            if suggestion.to_order > config.suggestion_epsilon {
                suggestions.push(suggestion);
            }
        }

        suggestions
    }

    /// 單一庫存項目的建議採購量（不需要時為 0）
    pub fn order_quantity(item: &InventoryItem, required: Decimal) -> Decimal {
        let buffer = item.minimum_threshold().max(required);
        let current = item.current_stock();
        if current < buffer {
            buffer - current
        } else {
            Decimal::ZERO
        }
    }
}
