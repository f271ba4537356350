//! 記憶體文件庫（測試與示例使用）

use chrono::NaiveDate;
use pantry_core::{DailyOrder, Dish, InventoryItem, KitchenError, Result, WeeklyMenu};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::KitchenStore;

#[derive(Debug, Default)]
struct MemoryState {
    dishes: Vec<Dish>,
    inventory: Vec<InventoryItem>,
    menus: Vec<WeeklyMenu>,
    orders: Vec<DailyOrder>,
    /// 寫入時模擬失敗的庫存項目ID
    failing_items: HashSet<String>,
    writes: usize,
}

/// 記憶體文件庫
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// 創建空的文件庫
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置菜餚
    pub fn with_dishes(self, dishes: Vec<Dish>) -> Self {
        self.mutate(|state| state.dishes = dishes)
    }

    /// 建構器模式：設置庫存
    pub fn with_inventory(self, inventory: Vec<InventoryItem>) -> Self {
        self.mutate(|state| state.inventory = inventory)
    }

    /// 建構器模式：設置週菜單
    pub fn with_menus(self, menus: Vec<WeeklyMenu>) -> Self {
        self.mutate(|state| state.menus = menus)
    }

    /// 建構器模式：設置每日點單
    pub fn with_orders(self, orders: Vec<DailyOrder>) -> Self {
        self.mutate(|state| state.orders = orders)
    }

    /// 建構器模式：寫入指定庫存項目時回傳錯誤
    pub fn with_failing_item(self, stock_item_id: &str) -> Self {
        self.mutate(|state| {
            state.failing_items.insert(stock_item_id.to_string());
        })
    }

    /// 取得庫存項目快照
    pub fn inventory_item(&self, id: &str) -> Option<InventoryItem> {
        self.read()
            .ok()?
            .inventory
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// 已儲存的點單數
    pub fn order_count(&self) -> usize {
        self.read().map(|state| state.orders.len()).unwrap_or(0)
    }

    /// 成功寫入次數（庫存與點單）
    pub fn write_count(&self) -> usize {
        self.read().map(|state| state.writes).unwrap_or(0)
    }

    fn mutate(self, apply: impl FnOnce(&mut MemoryState)) -> Self {
        if let Ok(mut state) = self.state.write() {
            apply(&mut state);
        }
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| KitchenError::Store("記憶體文件庫的鎖已損壞".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| KitchenError::Store("記憶體文件庫的鎖已損壞".to_string()))
    }

    fn update_item(&self, id: &str, apply: impl FnOnce(&mut InventoryItem)) -> Result<()> {
        let mut state = self.write()?;
        if state.failing_items.contains(id) {
            return Err(KitchenError::Store(format!("寫入庫存項目 {} 失敗", id)));
        }

        let item = state
            .inventory
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| KitchenError::InventoryItemNotFound(id.to_string()))?;
        apply(item);
        state.writes += 1;
        Ok(())
    }
}

impl KitchenStore for MemoryStore {
    async fn get_dish(&self, id: &str) -> Result<Option<Dish>> {
        Ok(self.read()?.dishes.iter().find(|dish| dish.id == id).cloned())
    }

    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        Ok(self.read()?.dishes.clone())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        Ok(self.read()?.inventory.clone())
    }

    async fn update_inventory_quantity(&self, id: &str, new_quantity: Decimal) -> Result<()> {
        self.update_item(id, |item| item.set_quantity(new_quantity))
    }

    async fn update_minimum_threshold(&self, id: &str, minimum: Decimal) -> Result<()> {
        self.update_item(id, |item| item.set_minimum(minimum))
    }

    async fn list_daily_orders(&self) -> Result<Vec<DailyOrder>> {
        Ok(self.read()?.orders.clone())
    }

    async fn get_daily_order(&self, date: NaiveDate, menu_id: &str) -> Result<Option<DailyOrder>> {
        Ok(self
            .read()?
            .orders
            .iter()
            .find(|order| order.is_for(date, menu_id))
            .cloned())
    }

    async fn save_daily_order(&self, order: DailyOrder) -> Result<()> {
        let mut state = self.write()?;
        match state.orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => state.orders.push(order),
        }
        state.writes += 1;
        Ok(())
    }

    async fn get_weekly_menu_for_date(&self, date: NaiveDate) -> Result<Option<WeeklyMenu>> {
        Ok(self
            .read()?
            .menus
            .iter()
            .find(|menu| menu.covers(date))
            .cloned())
    }
}
