//! 備料計算配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::KitchenError;

/// 預測與扣減的計算參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 無法從包裝描述推測單位時使用的單位
    pub default_unit: String,

    /// 找不到庫存時的佔位名稱前綴，後接食材ID
    pub placeholder_prefix: String,

    /// 配方巢狀層級上限（超過視為結構錯誤）
    pub max_recipe_depth: usize,

    /// 建議採購量不大於此值時不輸出
    pub suggestion_epsilon: Decimal,

    /// 是否輸出消耗量為 0 的扣減（寫回原數量）
    pub emit_noop_updates: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            default_unit: "units".to_string(),
            placeholder_prefix: "Unknown Ingredient".to_string(),
            max_recipe_depth: 64,
            suggestion_epsilon: Decimal::ZERO,
            emit_noop_updates: false,
        }
    }
}

impl PlanningConfig {
    /// 從 JSON 載入，缺少的欄位使用預設值
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| KitchenError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置預設單位
    pub fn with_default_unit(mut self, unit: String) -> Self {
        self.default_unit = unit;
        self
    }

    /// 建構器模式：設置配方層級上限
    pub fn with_max_recipe_depth(mut self, depth: usize) -> Self {
        self.max_recipe_depth = depth;
        self
    }

    /// 建構器模式：設置建議採購量門檻
    pub fn with_suggestion_epsilon(mut self, epsilon: Decimal) -> Self {
        self.suggestion_epsilon = epsilon;
        self
    }

    /// 建構器模式：設置是否輸出無變化的扣減
    pub fn with_emit_noop_updates(mut self, emit: bool) -> Self {
        self.emit_noop_updates = emit;
        self
    }

    /// 檢查參數
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_recipe_depth == 0 {
            return Err(KitchenError::InvalidConfig(
                "max_recipe_depth 必須大於 0".to_string(),
            ));
        }
        if self.suggestion_epsilon < Decimal::ZERO {
            return Err(KitchenError::InvalidConfig(
                "suggestion_epsilon 不可為負".to_string(),
            ));
        }
        Ok(())
    }

    /// 找不到庫存時的佔位名稱
    pub fn placeholder_name(&self, ingredient_id: &str) -> String {
        format!("{} (ID: {})", self.placeholder_prefix, ingredient_id)
    }
}
