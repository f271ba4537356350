//! 文件庫欄位格式不一致：識別碼與數量可能是字串也可能是數字

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text.trim().to_string(),
            TextOrNumber::Integer(value) => value.to_string(),
            // 12.0 與 12 視為同一識別碼
            TextOrNumber::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                (value as i64).to_string()
            }
            TextOrNumber::Float(value) => value.to_string(),
        }
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer)
        .map(|value| value.map(TextOrNumber::into_text).filter(|text| !text.is_empty()))
}
