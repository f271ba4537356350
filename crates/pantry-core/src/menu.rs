//! 週菜單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 週菜單：在日期區間內供應的菜餚
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMenu {
    /// 菜單ID
    pub id: String,

    /// 菜單名稱
    pub name: String,

    /// 開始日期（含）
    pub start_date: NaiveDate,

    /// 結束日期（含）
    pub end_date: NaiveDate,

    /// 供應菜餚（依菜單順序）
    #[serde(default)]
    pub dish_ids: Vec<String>,
}

impl WeeklyMenu {
    /// 創建新的週菜單
    pub fn new(id: String, name: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            start_date,
            end_date,
            dish_ids: Vec::new(),
        }
    }

    /// 建構器模式：設置供應菜餚
    pub fn with_dish_ids(mut self, dish_ids: Vec<String>) -> Self {
        self.dish_ids = dish_ids;
        self
    }

    /// 檢查日期是否落在菜單區間內
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// 檢查菜單是否供應該菜餚
    pub fn offers(&self, dish_id: &str) -> bool {
        self.dish_ids.iter().any(|id| id == dish_id)
    }
}
