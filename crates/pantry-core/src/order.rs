//! 每日點單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 單一菜餚的點單數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishOrder {
    /// 菜餚ID
    pub dish_id: String,

    /// 點單份數
    pub ordered_quantity: u32,
}

impl DishOrder {
    pub fn new(dish_id: String, ordered_quantity: u32) -> Self {
        Self {
            dish_id,
            ordered_quantity,
        }
    }

    /// 份數為 0 的行不參與計算
    pub fn is_active(&self) -> bool {
        self.ordered_quantity > 0
    }
}

/// 每日點單：每個（日期, 週菜單）只有一筆，之後的儲存為更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOrder {
    /// 點單ID
    pub id: String,

    /// 日期
    pub date: NaiveDate,

    /// 所屬週菜單
    pub menu_id: String,

    /// 菜餚點單
    #[serde(default)]
    pub dish_orders: Vec<DishOrder>,
}

impl DailyOrder {
    /// 創建新的每日點單
    pub fn new(date: NaiveDate, menu_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            menu_id,
            dish_orders: Vec::new(),
        }
    }

    /// 建構器模式：設置菜餚點單
    pub fn with_dish_orders(mut self, dish_orders: Vec<DishOrder>) -> Self {
        self.dish_orders = dish_orders;
        self
    }

    /// 建構器模式：添加菜餚點單
    pub fn with_dish_order(mut self, dish_id: &str, ordered_quantity: u32) -> Self {
        self.dish_orders
            .push(DishOrder::new(dish_id.to_string(), ordered_quantity));
        self
    }

    /// 份數大於 0 的點單行
    pub fn active_lines(&self) -> impl Iterator<Item = &DishOrder> {
        self.dish_orders.iter().filter(|line| line.is_active())
    }

    /// 移除份數為 0 的點單行
    pub fn retain_active(&mut self) {
        self.dish_orders.retain(DishOrder::is_active);
    }

    /// 總份數
    pub fn total_portions(&self) -> u64 {
        self.dish_orders
            .iter()
            .map(|line| u64::from(line.ordered_quantity))
            .sum()
    }

    /// 是否與指定日期及菜單相符
    pub fn is_for(&self, date: NaiveDate, menu_id: &str) -> bool {
        self.date == date && self.menu_id == menu_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_daily_order() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
        let order = DailyOrder::new(date, "MENU-45".to_string())
            .with_dish_order("D-1", 12)
            .with_dish_order("D-2", 0)
            .with_dish_order("D-3", 5);

        assert_eq!(order.active_lines().count(), 2);
        assert_eq!(order.total_portions(), 17);
        assert!(order.is_for(date, "MENU-45"));
        assert!(!order.is_for(date, "MENU-46"));
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_retain_active() {
        let mut order = DailyOrder::new(NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(), "M".to_string())
            .with_dish_order("D-1", 0)
            .with_dish_order("D-2", 3);

        order.retain_active();

        assert_eq!(order.dish_orders, vec![DishOrder::new("D-2".to_string(), 3)]);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "o-1",
            "date": "2025-11-04",
            "menuId": "MENU-45",
            "dishOrders": [{ "dishId": "D-1", "orderedQuantity": 4 }]
        }"#;

        let order: DailyOrder = serde_json::from_str(json).unwrap();

        assert_eq!(order.menu_id, "MENU-45");
        assert_eq!(order.dish_orders[0].ordered_quantity, 4);
    }
}
