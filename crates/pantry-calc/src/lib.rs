//! # Pantry Calculation Engine
//!
//! 配方展開、需求彙總、採購建議與庫存扣減

pub mod aggregate;
pub mod catalog;
pub mod deduction;
pub mod flatten;
pub mod forecast;
pub mod low_stock;
pub mod matching;
pub mod requirements;
pub mod suggestion;

// Re-export 主要類型
pub use aggregate::{Aggregation, RequirementAggregator, SkippedDish};
pub use catalog::{DishCatalog, RecipeResolver};
pub use deduction::{
    DeductionEngine, DeductionPlan, DeductionReport, DishFailure, UnresolvedIngredient,
    WriteFailure,
};
pub use flatten::{FlattenedIngredient, FlattenedRecipe, RecipeFlattener};
pub use forecast::{ForecastResult, ForecastWarning};
pub use low_stock::LowStockScanner;
pub use matching::InventoryIndex;
pub use requirements::RequirementMap;
pub use suggestion::SuggestionEngine;
