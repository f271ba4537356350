//! # Pantry
//!
//! 廚房備料系統：配方展開、需求彙總、採購建議與庫存扣減

pub use pantry_calc;
pub use pantry_core;
pub use pantry_store;

pub use pantry_calc::{
    DeductionEngine, DeductionReport, DishCatalog, ForecastResult, ForecastWarning,
    RecipeFlattener, RequirementAggregator, RequirementMap, SuggestionEngine,
};
pub use pantry_core::{
    DailyOrder, Dish, DishOrder, InventoryItem, KitchenError, OrderSuggestion, PlanningConfig,
    RecipeLine, SubRecipe, WeeklyMenu,
};
pub use pantry_store::{KitchenPlanner, KitchenStore, MemoryStore, RecordOutcome};
