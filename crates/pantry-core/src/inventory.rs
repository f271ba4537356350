//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::serde_ids;

/// 庫存項目
///
/// 數量與最低庫存量以文字保存（與文件庫格式一致），讀取時才解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// 庫存項目ID（匯入資料中的 `stock_item_id`）
    #[serde(alias = "stock_item_id", deserialize_with = "serde_ids::text")]
    pub id: String,

    /// 食材ID（配方中引用的識別碼）
    #[serde(default, deserialize_with = "serde_ids::optional_text")]
    pub ingredient_id: Option<String>,

    /// 名稱
    #[serde(default)]
    pub name: String,

    /// 包裝描述（例如 "5 kg bag"）
    #[serde(default)]
    pub package_description: Option<String>,

    /// 現有數量
    #[serde(default, deserialize_with = "serde_ids::optional_text")]
    pub quantity: Option<String>,

    /// 最低庫存量
    #[serde(default, deserialize_with = "serde_ids::optional_text")]
    pub minimum_quantity_required: Option<String>,
}

impl InventoryItem {
    /// 創建新的庫存項目
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            ingredient_id: None,
            name,
            package_description: None,
            quantity: None,
            minimum_quantity_required: None,
        }
    }

    /// 建構器模式：設置食材ID
    pub fn with_ingredient_id(mut self, ingredient_id: String) -> Self {
        self.ingredient_id = Some(ingredient_id);
        self
    }

    /// 建構器模式：設置包裝描述
    pub fn with_package_description(mut self, description: String) -> Self {
        self.package_description = Some(description);
        self
    }

    /// 建構器模式：設置現有數量
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.set_quantity(quantity);
        self
    }

    /// 建構器模式：設置最低庫存量
    pub fn with_minimum(mut self, minimum: Decimal) -> Self {
        self.set_minimum(minimum);
        self
    }

    /// 現有庫存（無法解析時為 0）
    pub fn current_stock(&self) -> Decimal {
        parse_quantity(self.quantity.as_deref())
    }

    /// 最低庫存量（無法解析時為 0）
    pub fn minimum_threshold(&self) -> Decimal {
        parse_quantity(self.minimum_quantity_required.as_deref())
    }

    /// 以文字格式寫回數量
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = Some(format_quantity(quantity));
    }

    /// 以文字格式寫回最低庫存量
    pub fn set_minimum(&mut self, minimum: Decimal) {
        self.minimum_quantity_required = Some(format_quantity(minimum));
    }

    /// 檢查庫存是否低於最低庫存量（未設定最低量的項目不算）
    pub fn is_below_minimum(&self) -> bool {
        let minimum = self.minimum_threshold();
        minimum > Decimal::ZERO && self.current_stock() < minimum
    }

    /// 從包裝描述推測單位：取空白分隔後的第二個詞
    pub fn unit_label(&self) -> Option<&str> {
        self.package_description
            .as_deref()
            .and_then(|description| description.split_whitespace().nth(1))
    }
}

/// 解析以文字保存的數量
///
/// 解析失敗或缺值時為 0，負值截為 0。數字後接單位（如 "12 kg"）時取前段數字。
pub fn parse_quantity(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Decimal::ZERO;
    };

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| leading_number(raw))
        .map(|value| value.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

fn leading_number(raw: &str) -> Option<Decimal> {
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    let end = raw.len() - unsigned.len() + digits;
    Decimal::from_str(&raw[..end]).ok()
}

fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}
