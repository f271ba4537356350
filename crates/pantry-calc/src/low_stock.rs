//! 低庫存檢查

use pantry_core::InventoryItem;

/// 低庫存掃描
pub struct LowStockScanner;

impl LowStockScanner {
    /// 低於最低庫存量的項目（依庫存順序；未設定最低量者不列入）
    pub fn scan(inventory: &[InventoryItem]) -> Vec<&InventoryItem> {
        inventory
            .iter()
            .filter(|item| item.is_below_minimum())
            .collect()
    }
}
