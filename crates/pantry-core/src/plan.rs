//! 計算結果模型：採購建議與庫存扣減

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::InventoryItem;

/// 採購建議
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSuggestion {
    /// 需求鍵（配方中的食材ID）
    pub ingredient_id: String,

    /// 對應的庫存項目ID（找不到庫存時為 None）
    pub stock_item_id: Option<String>,

    /// 名稱
    pub ingredient_name: String,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 需求數量
    pub required_amount: Decimal,

    /// 建議採購量
    pub to_order: Decimal,

    /// 單位
    pub unit: String,
}

impl OrderSuggestion {
    /// 依庫存項目建立建議
    pub fn for_item(
        ingredient_id: String,
        item: &InventoryItem,
        required_amount: Decimal,
        to_order: Decimal,
        default_unit: &str,
    ) -> Self {
        Self {
            ingredient_id,
            stock_item_id: Some(item.id.clone()),
            ingredient_name: item.name.clone(),
            current_stock: item.current_stock(),
            required_amount,
            to_order,
            unit: item.unit_label().unwrap_or(default_unit).to_string(),
        }
    }

    /// 找不到庫存時：全部需求都要採購
    pub fn unresolved(
        ingredient_id: String,
        ingredient_name: String,
        required_amount: Decimal,
        default_unit: &str,
    ) -> Self {
        Self {
            ingredient_id,
            stock_item_id: None,
            ingredient_name,
            current_stock: Decimal::ZERO,
            required_amount,
            to_order: required_amount,
            unit: default_unit.to_string(),
        }
    }

    /// 是否已對應到庫存項目
    pub fn is_resolved(&self) -> bool {
        self.stock_item_id.is_some()
    }
}

/// 單一庫存項目的扣減
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    /// 庫存項目ID（寫入目標）
    pub stock_item_id: String,

    /// 名稱
    pub name: String,

    /// 扣減前數量
    pub previous_quantity: Decimal,

    /// 累計消耗量
    pub consumed: Decimal,

    /// 扣減後數量（不低於 0）
    pub new_quantity: Decimal,
}

impl InventoryUpdate {
    /// 以庫存快照建立（尚未消耗）
    pub fn from_item(item: &InventoryItem) -> Self {
        let current = item.current_stock();
        Self {
            stock_item_id: item.id.clone(),
            name: item.name.clone(),
            previous_quantity: current,
            consumed: Decimal::ZERO,
            new_quantity: current,
        }
    }

    /// 累加消耗量，庫存截至 0
    ///
    /// 回傳扣減後數量；數值溢位時回傳 `None` 且不修改任何欄位。
    pub fn consume(&mut self, amount: Decimal) -> Option<Decimal> {
        let consumed = self.consumed.checked_add(amount)?;
        let remaining = self.new_quantity.checked_sub(amount)?.max(Decimal::ZERO);
        self.consumed = consumed;
        self.new_quantity = remaining;
        Some(remaining)
    }

    /// 消耗量是否超過原有庫存（結果被截為 0）
    pub fn is_clamped(&self) -> bool {
        self.consumed > self.previous_quantity
    }
}
