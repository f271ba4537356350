//! 菜餚目錄

use pantry_core::{Dish, RecipeLine};
use std::collections::HashMap;

/// 引用型子配方的解析來源
pub trait RecipeResolver {
    /// 依ID取得配方行，找不到時回傳 None
    fn resolve_recipe(&self, recipe_id: &str) -> Option<&[RecipeLine]>;
}

/// 菜餚目錄（保留載入順序）
#[derive(Debug, Clone, Default)]
pub struct DishCatalog {
    dishes: Vec<Dish>,
    index: HashMap<String, usize>,
}

impl DishCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 從菜餚列表建立目錄；ID 重複時以第一筆為準
    pub fn from_dishes(dishes: Vec<Dish>) -> Self {
        let mut catalog = Self::new();
        for dish in dishes {
            catalog.insert(dish);
        }
        catalog
    }

    /// 加入菜餚，ID 已存在時忽略並回傳 false
    pub fn insert(&mut self, dish: Dish) -> bool {
        if self.index.contains_key(&dish.id) {
            return false;
        }
        self.index.insert(dish.id.clone(), self.dishes.len());
        self.dishes.push(dish);
        true
    }

    /// 依ID查找菜餚
    pub fn get(&self, dish_id: &str) -> Option<&Dish> {
        self.index.get(dish_id).map(|&i| &self.dishes[i])
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// 依載入順序迭代
    pub fn iter(&self) -> impl Iterator<Item = &Dish> {
        self.dishes.iter()
    }

    /// 依給定ID順序取出菜餚，略過不存在的ID
    pub fn select<'a, I>(&'a self, dish_ids: I) -> Vec<&'a Dish>
    where
        I: IntoIterator<Item = &'a String>,
    {
        dish_ids.into_iter().filter_map(|id| self.get(id)).collect()
    }
}

impl RecipeResolver for DishCatalog {
    fn resolve_recipe(&self, recipe_id: &str) -> Option<&[RecipeLine]> {
        self.get(recipe_id).map(|dish| dish.ingredients.as_slice())
    }
}

impl FromIterator<Dish> for DishCatalog {
    fn from_iter<T: IntoIterator<Item = Dish>>(iter: T) -> Self {
        Self::from_dishes(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_catalog_lookup() {
        let catalog = DishCatalog::from_dishes(vec![
            Dish::new("D-1".to_string(), "Soup".to_string())
                .with_line(RecipeLine::ingredient("1", "Onion", Decimal::ONE)),
            Dish::new("D-2".to_string(), "Salad".to_string()),
            Dish::new("D-1".to_string(), "Duplicate".to_string()),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("D-1").unwrap().name, "Soup");
        assert!(catalog.get("D-3").is_none());
        assert_eq!(catalog.resolve_recipe("D-1").unwrap().len(), 1);
        assert!(catalog.resolve_recipe("D-3").is_none());
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let catalog: DishCatalog = vec![
            Dish::new("A".to_string(), "A".to_string()),
            Dish::new("B".to_string(), "B".to_string()),
        ]
        .into_iter()
        .collect();

        let ids = vec!["B".to_string(), "X".to_string(), "A".to_string()];
        let selected: Vec<&str> = catalog
            .select(&ids)
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();

        assert_eq!(selected, vec!["B", "A"]);
    }
}
