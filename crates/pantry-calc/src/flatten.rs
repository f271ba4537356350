//! 配方展開
//!
//! 將菜餚的配方樹（直接食材 + 巢狀子配方）展開為每種食材的總用量。
//! 子配方不乘以份量係數，直接累加其食材用量。

use pantry_core::{Dish, IngredientLine, KitchenError, PlanningConfig, RecipeLine};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::catalog::{DishCatalog, RecipeResolver};

/// 展開後的單一食材
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedIngredient {
    pub ingredient_id: String,
    pub name: String,
    /// 單位提示
    pub package_description: Option<String>,
    /// 每份菜餚的總用量
    pub amount: Decimal,
}

/// 單一菜餚的展開結果（依首次出現順序）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedRecipe {
    entries: Vec<FlattenedIngredient>,
    index: HashMap<String, usize>,
}

impl FlattenedRecipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一行食材用量，不存在時從 0 建立
    ///
    /// 回傳累加後的用量；溢位時回傳 `None` 且不修改。
    pub fn add(&mut self, line: &IngredientLine) -> Option<Decimal> {
        match self.index.get(&line.ingredient.id) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.amount = entry.amount.checked_add(line.amount)?;
                Some(entry.amount)
            }
            None => {
                self.index
                    .insert(line.ingredient.id.clone(), self.entries.len());
                self.entries.push(FlattenedIngredient {
                    ingredient_id: line.ingredient.id.clone(),
                    name: line.ingredient.name.clone(),
                    package_description: line.ingredient.package_description.clone(),
                    amount: line.amount,
                });
                Some(line.amount)
            }
        }
    }

    pub fn get(&self, ingredient_id: &str) -> Option<&FlattenedIngredient> {
        self.index.get(ingredient_id).map(|&i| &self.entries[i])
    }

    /// 指定食材的用量，不存在時為 0
    pub fn amount_of(&self, ingredient_id: &str) -> Decimal {
        self.get(ingredient_id)
            .map(|entry| entry.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlattenedIngredient> {
        self.entries.iter()
    }
}

/// 配方展開器
pub struct RecipeFlattener;

impl RecipeFlattener {
    /// 展開菜餚
    ///
    /// 引用型子配方透過 `resolver` 解析；解析失敗、循環引用或層級過深時回傳結構錯誤。
    pub fn flatten<R>(
        dish: &Dish,
        resolver: &R,
        config: &PlanningConfig,
    ) -> pantry_core::Result<FlattenedRecipe>
    where
        R: RecipeResolver + ?Sized,
    {
        let mut flattened = FlattenedRecipe::new();
        let mut trail = vec![dish.id.clone()];

        Self::walk(
            &dish.id,
            &dish.ingredients,
            resolver,
            config.max_recipe_depth,
            0,
            &mut trail,
            &mut flattened,
        )?;

        tracing::debug!(
            "展開菜餚 {}：{} 行配方 → {} 種食材",
            dish.id,
            dish.line_count(),
            flattened.len()
        );

        Ok(flattened)
    }

    /// 依ID展開菜餚；目錄中找不到菜餚時回傳空結果而非錯誤
    pub fn flatten_by_id(
        dish_id: &str,
        catalog: &DishCatalog,
        config: &PlanningConfig,
    ) -> pantry_core::Result<FlattenedRecipe> {
        match catalog.get(dish_id) {
            Some(dish) => Self::flatten(dish, catalog, config),
            None => {
                tracing::debug!("找不到菜餚 {}，視為無食材", dish_id);
                Ok(FlattenedRecipe::new())
            }
        }
    }

    /// 深度優先走訪
    ///
    /// `trail` 只記錄根菜餚與經由引用解析的配方ID，內嵌子配方不參與循環判斷。
    fn walk<R>(
        dish_id: &str,
        lines: &[RecipeLine],
        resolver: &R,
        max_depth: usize,
        depth: usize,
        trail: &mut Vec<String>,
        out: &mut FlattenedRecipe,
    ) -> pantry_core::Result<()>
    where
        R: RecipeResolver + ?Sized,
    {
        if depth > max_depth {
            return Err(KitchenError::RecipeTooDeep {
                dish_id: dish_id.to_string(),
                max_depth,
            });
        }

        for line in lines {
            match line {
                RecipeLine::Ingredient(ingredient_line) => {
                    out.add(ingredient_line)
                        .ok_or_else(|| KitchenError::QuantityOverflow {
                            dish_id: dish_id.to_string(),
                            ingredient_id: ingredient_line.ingredient.id.clone(),
                        })?;
                }
                RecipeLine::SubRecipe(sub) => match &sub.ingredients {
                    Some(nested) => {
                        Self::walk(dish_id, nested, resolver, max_depth, depth + 1, trail, out)?;
                    }
                    None => {
                        if trail.iter().any(|id| id == &sub.id) {
                            let mut path = trail.clone();
                            path.push(sub.id.clone());
                            return Err(KitchenError::CyclicRecipe {
                                dish_id: dish_id.to_string(),
                                path,
                            });
                        }

                        let nested = resolver.resolve_recipe(&sub.id).ok_or_else(|| {
                            KitchenError::UnresolvedSubRecipe {
                                dish_id: dish_id.to_string(),
                                sub_recipe_id: sub.id.clone(),
                            }
                        })?;

                        trail.push(sub.id.clone());
                        Self::walk(dish_id, nested, resolver, max_depth, depth + 1, trail, out)?;
                        trail.pop();
                    }
                },
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::SubRecipe;

    fn config() -> PlanningConfig {
        PlanningConfig::default()
    }

    #[test]
    fn test_empty_dish() {
        let dish = Dish::new("D-0".to_string(), "Water".to_string());
        let result = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_direct_lines_are_grouped() {
        let dish = Dish::new("D-1".to_string(), "Omelette".to_string())
            .with_line(RecipeLine::ingredient("EGG", "Egg", Decimal::from(2)))
            .with_line(RecipeLine::ingredient("BUTTER", "Butter", Decimal::new(1, 1)))
            .with_line(RecipeLine::ingredient("EGG", "Egg", Decimal::from(1)));

        let result = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.amount_of("EGG"), Decimal::from(3));
        assert_eq!(result.amount_of("BUTTER"), Decimal::new(1, 1));
        // 保留首次出現順序
        let ids: Vec<_> = result.iter().map(|e| e.ingredient_id.as_str()).collect();
        assert_eq!(ids, vec!["EGG", "BUTTER"]);
    }

    #[test]
    fn test_nested_sub_recipe_is_not_scaled() {
        // A 含子配方 B（X=2），A 直接引用 X=3 → X=5
        let dish = Dish::new("A".to_string(), "Dish A".to_string())
            .with_line(RecipeLine::sub_recipe(
                SubRecipe::inline(
                    "B".to_string(),
                    "Sub B".to_string(),
                    vec![RecipeLine::ingredient("X", "X", Decimal::from(2))],
                )
                .with_portion("4 portions".to_string()),
            ))
            .with_line(RecipeLine::ingredient("X", "X", Decimal::from(3)));

        let result = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.amount_of("X"), Decimal::from(5));
    }

    #[test]
    fn test_deeply_nested_sub_recipes() {
        let mut lines = vec![RecipeLine::ingredient("SALT", "Salt", Decimal::ONE)];
        for level in 0..10 {
            lines = vec![
                RecipeLine::ingredient("SALT", "Salt", Decimal::ONE),
                RecipeLine::sub_recipe(SubRecipe::inline(
                    format!("S-{level}"),
                    format!("Level {level}"),
                    lines,
                )),
            ];
        }
        let dish = Dish::new("D".to_string(), "Tower".to_string()).with_lines(lines);

        let result = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap();

        assert_eq!(result.amount_of("SALT"), Decimal::from(11));
    }

    #[test]
    fn test_referenced_sub_recipe_is_resolved() {
        let catalog = DishCatalog::from_dishes(vec![Dish::new(
            "BROTH".to_string(),
            "Broth".to_string(),
        )
        .with_line(RecipeLine::ingredient("BONES", "Bones", Decimal::from(4)))
        .with_line(RecipeLine::ingredient("ONION", "Onion", Decimal::ONE))]);

        let dish = Dish::new("SOUP".to_string(), "Soup".to_string())
            .with_line(RecipeLine::sub_recipe(SubRecipe::reference(
                "BROTH".to_string(),
                "Broth".to_string(),
            )))
            .with_line(RecipeLine::ingredient("ONION", "Onion", Decimal::ONE));

        let result = RecipeFlattener::flatten(&dish, &catalog, &config()).unwrap();

        assert_eq!(result.amount_of("BONES"), Decimal::from(4));
        assert_eq!(result.amount_of("ONION"), Decimal::from(2));
    }

    #[test]
    fn test_missing_sub_recipe_fails() {
        let dish = Dish::new("SOUP".to_string(), "Soup".to_string()).with_line(
            RecipeLine::sub_recipe(SubRecipe::reference(
                "MISSING".to_string(),
                "Missing".to_string(),
            )),
        );

        let err = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap_err();

        match err {
            KitchenError::UnresolvedSubRecipe {
                dish_id,
                sub_recipe_id,
            } => {
                assert_eq!(dish_id, "SOUP");
                assert_eq!(sub_recipe_id, "MISSING");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cycle_is_detected() {
        let catalog = DishCatalog::from_dishes(vec![
            Dish::new("A".to_string(), "A".to_string()).with_line(RecipeLine::sub_recipe(
                SubRecipe::reference("B".to_string(), "B".to_string()),
            )),
            Dish::new("B".to_string(), "B".to_string())
                .with_line(RecipeLine::ingredient("X", "X", Decimal::ONE))
                .with_line(RecipeLine::sub_recipe(SubRecipe::reference(
                    "A".to_string(),
                    "A".to_string(),
                ))),
        ]);

        let err = RecipeFlattener::flatten_by_id("A", &catalog, &config()).unwrap_err();

        match err {
            KitchenError::CyclicRecipe { dish_id, path } => {
                assert_eq!(dish_id, "A");
                assert_eq!(path, vec!["A", "B", "A"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shared_sub_recipe_is_not_a_cycle() {
        // 同一子配方出現在兩個分支不算循環
        let catalog = DishCatalog::from_dishes(vec![Dish::new(
            "DRESSING".to_string(),
            "Dressing".to_string(),
        )
        .with_line(RecipeLine::ingredient("OIL", "Oil", Decimal::ONE))]);

        let dressing = || {
            RecipeLine::sub_recipe(SubRecipe::reference(
                "DRESSING".to_string(),
                "Dressing".to_string(),
            ))
        };
        let dish = Dish::new("BOWL".to_string(), "Bowl".to_string())
            .with_line(dressing())
            .with_line(dressing());

        let result = RecipeFlattener::flatten(&dish, &catalog, &config()).unwrap();

        assert_eq!(result.amount_of("OIL"), Decimal::from(2));
    }

    #[test]
    fn test_depth_limit() {
        let mut lines = vec![RecipeLine::ingredient("X", "X", Decimal::ONE)];
        for level in 0..5 {
            lines = vec![RecipeLine::sub_recipe(SubRecipe::inline(
                format!("S-{level}"),
                String::new(),
                lines,
            ))];
        }
        let dish = Dish::new("DEEP".to_string(), "Deep".to_string()).with_lines(lines);

        let shallow = PlanningConfig::default().with_max_recipe_depth(3);
        assert!(matches!(
            RecipeFlattener::flatten(&dish, &DishCatalog::new(), &shallow),
            Err(KitchenError::RecipeTooDeep { max_depth: 3, .. })
        ));

        let enough = PlanningConfig::default().with_max_recipe_depth(5);
        assert!(RecipeFlattener::flatten(&dish, &DishCatalog::new(), &enough).is_ok());
    }

    #[test]
    fn test_amount_overflow_is_an_error() {
        let dish = Dish::new("FEAST".to_string(), "Feast".to_string())
            .with_line(RecipeLine::ingredient("RICE", "Rice", Decimal::MAX))
            .with_line(RecipeLine::sub_recipe(SubRecipe::inline(
                "SIDE".to_string(),
                "Side".to_string(),
                vec![RecipeLine::ingredient("RICE", "Rice", Decimal::MAX)],
            )));

        let err = RecipeFlattener::flatten(&dish, &DishCatalog::new(), &config()).unwrap_err();

        match err {
            KitchenError::QuantityOverflow {
                dish_id,
                ingredient_id,
            } => {
                assert_eq!(dish_id, "FEAST");
                assert_eq!(ingredient_id, "RICE");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_flatten_unknown_dish_is_empty() {
        let result = RecipeFlattener::flatten_by_id("NOPE", &DishCatalog::new(), &config()).unwrap();

        assert!(result.is_empty());
    }
}
