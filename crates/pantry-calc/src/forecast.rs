//! 週菜單預測結果

use pantry_core::OrderSuggestion;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::aggregate::{Aggregation, SkippedDish};
use crate::requirements::RequirementMap;

/// 預測時需要人工確認的狀況
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastWarning {
    /// 點單引用了目錄中不存在的菜餚，該行未計入需求
    MissingDish {
        order_id: String,
        dish_id: String,
        ordered_quantity: u32,
    },
    /// 需求食材找不到對應庫存，建議量即為全部需求
    UnmatchedIngredient {
        ingredient_id: String,
        to_order: Decimal,
    },
}

impl ForecastWarning {
    /// 警告對象的ID（菜餚或食材）
    pub fn subject_id(&self) -> &str {
        match self {
            ForecastWarning::MissingDish { dish_id, .. } => dish_id,
            ForecastWarning::UnmatchedIngredient { ingredient_id, .. } => ingredient_id,
        }
    }
}

impl fmt::Display for ForecastWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastWarning::MissingDish {
                order_id,
                dish_id,
                ordered_quantity,
            } => write!(
                f,
                "點單 {} 的菜餚 {}（{} 份）不在目錄中，未計入需求",
                order_id, dish_id, ordered_quantity
            ),
            ForecastWarning::UnmatchedIngredient {
                ingredient_id,
                to_order,
            } => write!(f, "食材 {} 找不到對應庫存，建議採購 {}", ingredient_id, to_order),
        }
    }
}

impl From<&SkippedDish> for ForecastWarning {
    fn from(skipped: &SkippedDish) -> Self {
        ForecastWarning::MissingDish {
            order_id: skipped.order_id.clone(),
            dish_id: skipped.dish_id.clone(),
            ordered_quantity: skipped.ordered_quantity,
        }
    }
}

/// 單一週菜單的預測結果
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub menu_id: String,
    /// 採購建議（依需求出現順序）
    pub suggestions: Vec<OrderSuggestion>,
    pub requirements: RequirementMap,
    pub warnings: Vec<ForecastWarning>,
    pub elapsed: Duration,
}

impl ForecastResult {
    /// 由彙總與建議組成結果；略過的菜餚與無庫存的食材轉為警告
    pub fn new(
        menu_id: String,
        aggregation: Aggregation,
        suggestions: Vec<OrderSuggestion>,
    ) -> Self {
        let mut warnings: Vec<ForecastWarning> =
            aggregation.skipped.iter().map(ForecastWarning::from).collect();
        warnings.extend(
            suggestions
                .iter()
                .filter(|suggestion| !suggestion.is_resolved())
                .map(|suggestion| ForecastWarning::UnmatchedIngredient {
                    ingredient_id: suggestion.ingredient_id.clone(),
                    to_order: suggestion.to_order,
                }),
        );

        Self {
            menu_id,
            suggestions,
            requirements: aggregation.requirements,
            warnings,
            elapsed: Duration::ZERO,
        }
    }

    /// 沒有任何點單時的結果
    pub fn empty(menu_id: String) -> Self {
        Self::new(menu_id, Aggregation::default(), Vec::new())
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// 找不到庫存的建議數
    pub fn unresolved_count(&self) -> usize {
        self.suggestions.iter().filter(|s| !s.is_resolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::InventoryItem;

    fn aggregation() -> Aggregation {
        let mut requirements = RequirementMap::new();
        requirements.add("FLOUR", Decimal::from(3));
        requirements.add("YEAST", Decimal::new(5, 2));
        Aggregation {
            requirements,
            skipped: vec![SkippedDish {
                order_id: "O-1".to_string(),
                dish_id: "GHOST".to_string(),
                ordered_quantity: 4,
            }],
        }
    }

    fn suggestions() -> Vec<OrderSuggestion> {
        let flour = InventoryItem::new("S-1".to_string(), "Flour".to_string())
            .with_ingredient_id("FLOUR".to_string())
            .with_quantity(Decimal::ONE);
        vec![
            OrderSuggestion::for_item(
                "FLOUR".to_string(),
                &flour,
                Decimal::from(3),
                Decimal::from(2),
                "units",
            ),
            OrderSuggestion::unresolved(
                "YEAST".to_string(),
                "Unknown Ingredient (ID: YEAST)".to_string(),
                Decimal::new(5, 2),
                "units",
            ),
        ]
    }

    #[test]
    fn test_warnings_follow_skips_then_unmatched() {
        let result = ForecastResult::new("W1".to_string(), aggregation(), suggestions());

        assert_eq!(
            result.warnings,
            vec![
                ForecastWarning::MissingDish {
                    order_id: "O-1".to_string(),
                    dish_id: "GHOST".to_string(),
                    ordered_quantity: 4,
                },
                ForecastWarning::UnmatchedIngredient {
                    ingredient_id: "YEAST".to_string(),
                    to_order: Decimal::new(5, 2),
                },
            ]
        );
        assert_eq!(result.warnings[1].subject_id(), "YEAST");
        assert_eq!(result.unresolved_count(), 1);
        assert_eq!(result.requirements.len(), 2);
    }

    #[test]
    fn test_warning_message_and_json() {
        let warning = ForecastWarning::UnmatchedIngredient {
            ingredient_id: "YEAST".to_string(),
            to_order: Decimal::new(5, 2),
        };

        assert_eq!(warning.to_string(), "食材 YEAST 找不到對應庫存，建議採購 0.05");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "unmatched_ingredient");
        assert_eq!(json["ingredient_id"], "YEAST");
    }

    #[test]
    fn test_empty() {
        let result = ForecastResult::empty("W2".to_string());

        assert_eq!(result.menu_id, "W2");
        assert!(result.warnings.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.elapsed, Duration::ZERO);
    }
}
