//! 食材需求表

use rust_decimal::Decimal;
use std::collections::HashMap;

/// 食材ID → 總需求量（保留插入順序）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementMap {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl RequirementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加需求量
    ///
    /// 回傳累加後的需求量；溢位時回傳 `None` 且不修改。
    pub fn add(&mut self, ingredient_id: &str, amount: Decimal) -> Option<Decimal> {
        match self.index.get(ingredient_id) {
            Some(&i) => {
                let total = self.entries[i].1.checked_add(amount)?;
                self.entries[i].1 = total;
                Some(total)
            }
            None => {
                self.index
                    .insert(ingredient_id.to_string(), self.entries.len());
                self.entries.push((ingredient_id.to_string(), amount));
                Some(amount)
            }
        }
    }

    /// 指定食材的需求量
    pub fn get(&self, ingredient_id: &str) -> Option<Decimal> {
        self.index.get(ingredient_id).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依插入順序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(id, amount)| (id.as_str(), *amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_in_insertion_order() {
        let mut map = RequirementMap::new();
        map.add("B", Decimal::from(2));
        map.add("A", Decimal::from(1));
        assert_eq!(map.add("B", Decimal::new(5, 1)), Some(Decimal::new(25, 1)));

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(
            entries,
            vec![("B", Decimal::new(25, 1)), ("A", Decimal::from(1))]
        );
        assert_eq!(map.get("Z"), None);
    }

    #[test]
    fn test_overflow_keeps_previous_total() {
        let mut map = RequirementMap::new();
        map.add("X", Decimal::MAX);

        assert_eq!(map.add("X", Decimal::ONE), None);
        assert_eq!(map.get("X"), Some(Decimal::MAX));
        assert_eq!(map.len(), 1);
    }
}
