//! 週菜單備料示例
//!
//! 以記憶體文件庫示範：匯入菜餚與庫存、記錄每日點單、計算採購建議。
//! 使用 `RUST_LOG=debug` 查看計算細節。

use anyhow::Context;
use chrono::NaiveDate;
use pantry::{
    Dish, DishOrder, InventoryItem, KitchenPlanner, MemoryStore, PlanningConfig, WeeklyMenu,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DISHES: &str = r#"[
    {
        "id": "LASAGNA",
        "variantName": "Beef lasagna",
        "ingredients": [
            { "ingredient": { "id": "PASTA", "name": "Lasagna sheets" }, "amount": 0.12 },
            { "ingredient": { "id": "BEEF", "name": "Minced beef" }, "amount": 0.15 },
            { "subRecipe": { "id": "BECHAMEL", "name": "Béchamel", "portion": "80 ml" } }
        ]
    },
    {
        "id": "BECHAMEL",
        "name": "Béchamel",
        "ingredients": [
            { "ingredient": { "id": "MILK", "name": "Milk" }, "amount": 0.08 },
            { "ingredient": { "id": "BUTTER", "name": "Butter" }, "amount": "0.01" },
            { "ingredient": { "id": "FLOUR", "name": "Flour" }, "amount": "0.01" }
        ]
    },
    {
        "id": "SOUP",
        "name": "Tomato soup",
        "ingredients": [
            { "ingredient": { "id": "TOMATO", "name": "Tomatoes" }, "amount": 0.3 },
            { "subRecipe": {
                "id": "CROUTONS",
                "name": "Croutons",
                "ingredients": [
                    { "ingredient": { "id": "BREAD", "name": "Bread" }, "amount": 0.05 },
                    { "ingredient": { "id": "BUTTER", "name": "Butter" }, "amount": 0.005 }
                ]
            } }
        ]
    }
]"#;

const INVENTORY: &str = r#"[
    { "stock_item_id": 101, "ingredient_id": "PASTA", "name": "Lasagna sheets", "package_description": "5 kg box", "quantity": "4", "minimum_quantity_required": 2 },
    { "stock_item_id": 102, "ingredient_id": "BEEF", "name": "Minced beef", "package_description": "1 kg pack", "quantity": "3.5" },
    { "stock_item_id": 103, "ingredient_id": "MILK", "name": "Whole milk", "package_description": "1 l carton", "quantity": 12, "minimum_quantity_required": "6" },
    { "stock_item_id": 104, "ingredient_id": "BUTTER", "name": "Butter", "package_description": "250 g block", "quantity": "not counted" },
    { "stock_item_id": "TOMATO", "name": "Canned tomatoes", "package_description": "2.5 kg can", "quantity": 10 }
]"#;

fn date(day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 11, day).context("無效的日期")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== 週菜單備料示例 ===\n");

    let dishes: Vec<Dish> = serde_json::from_str(DISHES).context("菜餚資料格式錯誤")?;
    let inventory: Vec<InventoryItem> =
        serde_json::from_str(INVENTORY).context("庫存資料格式錯誤")?;
    let menu = WeeklyMenu::new("W45".to_string(), "Week 45".to_string(), date(3)?, date(9)?)
        .with_dish_ids(vec!["LASAGNA".to_string(), "SOUP".to_string()]);

    let store = MemoryStore::new()
        .with_dishes(dishes)
        .with_inventory(inventory)
        .with_menus(vec![menu]);
    let planner = KitchenPlanner::new(store, PlanningConfig::default());

    println!("週菜單菜餚:");
    for dish in planner.dishes_for_date(date(3)?).await? {
        println!("  - {} ({})", dish.name, dish.id);
    }

    for (day, lasagna, soup) in [(3, 20, 15), (4, 12, 0), (5, 18, 25)] {
        let outcome = planner
            .record_daily_orders(
                date(day)?,
                vec![
                    DishOrder::new("LASAGNA".to_string(), lasagna),
                    DishOrder::new("SOUP".to_string(), soup),
                ],
            )
            .await?;

        println!(
            "\n11/{:02} 點單 {}：扣減 {} 項，缺漏 {} 項",
            day,
            outcome.order_id,
            outcome.deduction.applied.len(),
            outcome.deduction.plan.unresolved.len()
        );
        for update in &outcome.deduction.applied {
            println!(
                "  - {}: {} → {}{}",
                update.name,
                update.previous_quantity,
                update.new_quantity,
                if update.is_clamped() { "（已歸零）" } else { "" }
            );
        }
    }

    let forecast = planner.forecast_for_menu("W45").await?;
    println!("\n週菜單 {} 預測耗時 {:?}", forecast.menu_id, forecast.elapsed);

    println!("\n食材需求:");
    for (ingredient_id, amount) in forecast.requirements.iter() {
        println!("  - {}: {}", ingredient_id, amount);
    }

    println!("\n採購建議:");
    for suggestion in &forecast.suggestions {
        println!(
            "  - {}: 現有 {}，需求 {}，建議採購 {} {}",
            suggestion.ingredient_name,
            suggestion.current_stock,
            suggestion.required_amount,
            suggestion.to_order,
            suggestion.unit
        );
    }

    for warning in &forecast.warnings {
        println!("  ! {}", warning);
    }

    println!("\n低庫存項目:");
    for item in planner.low_stock().await? {
        println!(
            "  - {}: {} / 最低 {}",
            item.name,
            item.current_stock(),
            item.minimum_threshold()
        );
    }

    Ok(())
}
