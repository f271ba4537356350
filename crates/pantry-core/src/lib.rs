//! # Pantry Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod plan;
pub mod recipe;

mod serde_ids;

// Re-export 主要類型
pub use config::PlanningConfig;
pub use inventory::{parse_quantity, InventoryItem};
pub use menu::WeeklyMenu;
pub use order::{DailyOrder, DishOrder};
pub use plan::{InventoryUpdate, OrderSuggestion};
pub use recipe::{
    Dish, DishRecord, IngredientLine, IngredientRef, RecipeLine, RecipeLineRecord, SubRecipe,
    SubRecipeRecord,
};

use chrono::NaiveDate;

/// 廚房備料錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum KitchenError {
    #[error("找不到菜餚: {0}")]
    DishNotFound(String),

    #[error("菜餚 {dish_id} 的子配方無法解析: {sub_recipe_id}")]
    UnresolvedSubRecipe {
        dish_id: String,
        sub_recipe_id: String,
    },

    #[error("菜餚 {dish_id} 的配方存在循環引用: {}", .path.join(" → "))]
    CyclicRecipe { dish_id: String, path: Vec<String> },

    #[error("菜餚 {dish_id} 的配方層級超過上限 {max_depth}")]
    RecipeTooDeep { dish_id: String, max_depth: usize },

    #[error("菜餚 {dish_id} 第 {index} 行配方格式錯誤：必須是食材或子配方其中之一")]
    MalformedRecipeLine { dish_id: String, index: usize },

    #[error("菜餚 {dish_id} 的食材 {ingredient_id} 用量超出可計算範圍")]
    QuantityOverflow {
        dish_id: String,
        ingredient_id: String,
    },

    #[error("日期 {0} 沒有對應的週菜單")]
    NoMenuForDate(NaiveDate),

    #[error("找不到庫存項目: {0}")]
    InventoryItemNotFound(String),

    #[error("無效的最低庫存量: {0}")]
    InvalidThreshold(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("儲存層錯誤: {0}")]
    Store(String),

    #[error("預測計算失敗，請重試: {0}")]
    ForecastFailed(#[source] Box<KitchenError>),

    #[error("庫存扣減失敗，請重試: {0}")]
    DeductionFailed(#[source] Box<KitchenError>),
}

impl KitchenError {
    /// 包裝為可重試的預測失敗
    pub fn forecast_failed(source: KitchenError) -> Self {
        match source {
            already @ KitchenError::ForecastFailed(_) => already,
            other => KitchenError::ForecastFailed(Box::new(other)),
        }
    }

    /// 包裝為可重試的扣減失敗
    pub fn deduction_failed(source: KitchenError) -> Self {
        match source {
            already @ KitchenError::DeductionFailed(_) => already,
            other => KitchenError::DeductionFailed(Box::new(other)),
        }
    }

    /// 呼叫端是否可以直接重試
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            KitchenError::ForecastFailed(_)
                | KitchenError::DeductionFailed(_)
                | KitchenError::Store(_)
        )
    }

    /// 是否為配方結構錯誤（資料損壞，而非預期中的缺漏）
    pub fn is_structural(&self) -> bool {
        match self {
            KitchenError::UnresolvedSubRecipe { .. }
            | KitchenError::CyclicRecipe { .. }
            | KitchenError::RecipeTooDeep { .. }
            | KitchenError::MalformedRecipeLine { .. } => true,
            KitchenError::ForecastFailed(inner) | KitchenError::DeductionFailed(inner) => {
                inner.is_structural()
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, KitchenError>;
