//! 菜餚與配方模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{serde_ids, KitchenError};

/// 配方中引用的食材
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    /// 食材ID（對應庫存項目的 `ingredient_id`）
    #[serde(deserialize_with = "serde_ids::text")]
    pub id: String,

    /// 顯示名稱
    #[serde(default)]
    pub name: String,

    /// 包裝描述（單位提示）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_description: Option<String>,
}

impl IngredientRef {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            package_description: None,
        }
    }

    pub fn with_package_description(mut self, description: String) -> Self {
        self.package_description = Some(description);
        self
    }
}

/// 直接食材行
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub ingredient: IngredientRef,
    /// 每份菜餚所需數量
    pub amount: Decimal,
}

/// 子配方
///
/// `ingredients` 為 `None` 時表示引用目錄中的另一個配方，展開時才解析。
#[derive(Debug, Clone, PartialEq)]
pub struct SubRecipe {
    pub id: String,
    pub name: String,
    /// 份量描述（僅供顯示，展開時不做縮放）
    pub portion: Option<String>,
    pub ingredients: Option<Vec<RecipeLine>>,
}

impl SubRecipe {
    /// 創建內嵌子配方
    pub fn inline(id: String, name: String, ingredients: Vec<RecipeLine>) -> Self {
        Self {
            id,
            name,
            portion: None,
            ingredients: Some(ingredients),
        }
    }

    /// 創建引用型子配方
    pub fn reference(id: String, name: String) -> Self {
        Self {
            id,
            name,
            portion: None,
            ingredients: None,
        }
    }

    pub fn with_portion(mut self, portion: String) -> Self {
        self.portion = Some(portion);
        self
    }
}

/// 配方行：直接食材或子配方，兩者互斥
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeLine {
    Ingredient(IngredientLine),
    SubRecipe(SubRecipe),
}

impl RecipeLine {
    /// 快捷建構：直接食材行
    pub fn ingredient(id: &str, name: &str, amount: Decimal) -> Self {
        RecipeLine::Ingredient(IngredientLine {
            ingredient: IngredientRef::new(id.to_string(), name.to_string()),
            amount,
        })
    }

    /// 快捷建構：子配方行
    pub fn sub_recipe(sub_recipe: SubRecipe) -> Self {
        RecipeLine::SubRecipe(sub_recipe)
    }
}

/// 菜餚
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DishRecord", into = "DishRecord")]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeLine>,
}

impl Dish {
    /// 創建新的菜餚
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            ingredients: Vec::new(),
        }
    }

    /// 建構器模式：添加配方行
    pub fn with_line(mut self, line: RecipeLine) -> Self {
        self.ingredients.push(line);
        self
    }

    /// 建構器模式：設置全部配方行
    pub fn with_lines(mut self, lines: Vec<RecipeLine>) -> Self {
        self.ingredients = lines;
        self
    }

    /// 配方樹中的行數（含子配方內嵌行）
    pub fn line_count(&self) -> usize {
        fn count(lines: &[RecipeLine]) -> usize {
            lines
                .iter()
                .map(|line| match line {
                    RecipeLine::Ingredient(_) => 1,
                    RecipeLine::SubRecipe(sub) => {
                        1 + sub.ingredients.as_deref().map(count).unwrap_or(0)
                    }
                })
                .sum()
        }
        count(&self.ingredients)
    }
}

/// 菜餚匯入記錄（文件庫格式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishRecord {
    #[serde(deserialize_with = "serde_ids::text")]
    pub id: String,

    #[serde(default, alias = "variantName")]
    pub name: String,

    #[serde(default)]
    pub ingredients: Vec<RecipeLineRecord>,
}

/// 配方行匯入記錄：`ingredient` 與 `subRecipe` 應恰好出現一個
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLineRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<IngredientRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_recipe: Option<SubRecipeRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// 子配方匯入記錄
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubRecipeRecord {
    #[serde(deserialize_with = "serde_ids::text")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeLineRecord>>,
}

impl TryFrom<DishRecord> for Dish {
    type Error = KitchenError;

    fn try_from(record: DishRecord) -> Result<Self, Self::Error> {
        let mut position = 0;
        let ingredients = convert_lines(&record.id, record.ingredients, &mut position)?;
        Ok(Dish {
            id: record.id,
            name: record.name,
            ingredients,
        })
    }
}

/// `position` 為深度優先的行序號（從 0 起算），用於錯誤定位
fn convert_lines(
    dish_id: &str,
    records: Vec<RecipeLineRecord>,
    position: &mut usize,
) -> Result<Vec<RecipeLine>, KitchenError> {
    let mut lines = Vec::with_capacity(records.len());

    for record in records {
        let index = *position;
        *position += 1;

        let line = match (record.ingredient, record.sub_recipe) {
            (Some(ingredient), None) => RecipeLine::Ingredient(IngredientLine {
                ingredient,
                amount: record.amount.unwrap_or(Decimal::ZERO),
            }),
            (None, Some(sub)) => {
                let ingredients = match sub.ingredients {
                    Some(nested) => Some(convert_lines(dish_id, nested, position)?),
                    None => None,
                };
                RecipeLine::SubRecipe(SubRecipe {
                    id: sub.id,
                    name: sub.name,
                    portion: sub.portion,
                    ingredients,
                })
            }
            _ => {
                return Err(KitchenError::MalformedRecipeLine {
                    dish_id: dish_id.to_string(),
                    index,
                })
            }
        };
        lines.push(line);
    }

    Ok(lines)
}

impl From<Dish> for DishRecord {
    fn from(dish: Dish) -> Self {
        DishRecord {
            id: dish.id,
            name: dish.name,
            ingredients: dish.ingredients.into_iter().map(line_record).collect(),
        }
    }
}

fn line_record(line: RecipeLine) -> RecipeLineRecord {
    match line {
        RecipeLine::Ingredient(line) => RecipeLineRecord {
            ingredient: Some(line.ingredient),
            sub_recipe: None,
            amount: Some(line.amount),
        },
        RecipeLine::SubRecipe(sub) => RecipeLineRecord {
            ingredient: None,
            sub_recipe: Some(SubRecipeRecord {
                id: sub.id,
                name: sub.name,
                portion: sub.portion,
                ingredients: sub
                    .ingredients
                    .map(|lines| lines.into_iter().map(line_record).collect()),
            }),
            amount: None,
        },
    }
}
