//! 文件庫存取介面
//!
//! 實際的文件庫（庫存、菜餚、週菜單、每日點單）由外部提供，這裡只定義形狀。

use chrono::NaiveDate;
use pantry_core::{DailyOrder, Dish, InventoryItem, Result, WeeklyMenu};
use rust_decimal::Decimal;
use std::future::Future;

/// 廚房文件庫
pub trait KitchenStore: Send + Sync {
    /// 依ID取得菜餚
    fn get_dish(&self, id: &str) -> impl Future<Output = Result<Option<Dish>>> + Send;

    /// 全部菜餚
    fn list_dishes(&self) -> impl Future<Output = Result<Vec<Dish>>> + Send;

    /// 全部庫存項目
    fn list_inventory(&self) -> impl Future<Output = Result<Vec<InventoryItem>>> + Send;

    /// 更新庫存數量（以庫存項目ID定位）
    fn update_inventory_quantity(
        &self,
        id: &str,
        new_quantity: Decimal,
    ) -> impl Future<Output = Result<()>> + Send;

    /// 更新最低庫存量
    fn update_minimum_threshold(
        &self,
        id: &str,
        minimum: Decimal,
    ) -> impl Future<Output = Result<()>> + Send;

    /// 全部每日點單
    fn list_daily_orders(&self) -> impl Future<Output = Result<Vec<DailyOrder>>> + Send;

    /// 指定日期與週菜單的點單
    fn get_daily_order(
        &self,
        date: NaiveDate,
        menu_id: &str,
    ) -> impl Future<Output = Result<Option<DailyOrder>>> + Send;

    /// 儲存點單：ID 已存在則更新，否則新增
    fn save_daily_order(&self, order: DailyOrder) -> impl Future<Output = Result<()>> + Send;

    /// 指定日期所屬的週菜單（文件庫保證每天至多一個）
    fn get_weekly_menu_for_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<WeeklyMenu>>> + Send;
}
