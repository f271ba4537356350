//! 庫存比對
//!
//! 需求鍵可能是食材ID，也可能是庫存項目ID（上游資料不一致），
//! 因此先比對 `ingredient_id`，再比對庫存項目本身的 `id`。

use pantry_core::InventoryItem;
use std::collections::HashMap;

/// 庫存索引（建立時的快照）
#[derive(Debug)]
pub struct InventoryIndex<'a> {
    items: &'a [InventoryItem],
    by_ingredient: HashMap<&'a str, usize>,
    by_stock_id: HashMap<&'a str, usize>,
}

impl<'a> InventoryIndex<'a> {
    /// 建立索引；同一ID重複時以第一筆為準
    pub fn new(items: &'a [InventoryItem]) -> Self {
        let mut by_ingredient = HashMap::new();
        let mut by_stock_id = HashMap::new();

        for (position, item) in items.iter().enumerate() {
            if let Some(ingredient_id) = item.ingredient_id.as_deref() {
                by_ingredient.entry(ingredient_id.trim()).or_insert(position);
            }
            by_stock_id.entry(item.id.trim()).or_insert(position);
        }

        Self {
            items,
            by_ingredient,
            by_stock_id,
        }
    }

    /// 比對到的庫存位置
    pub fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.by_ingredient
            .get(key)
            .or_else(|| self.by_stock_id.get(key))
            .copied()
    }

    /// 比對到的庫存項目
    pub fn find(&self, key: &str) -> Option<&'a InventoryItem> {
        self.position(key).map(|position| &self.items[position])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
