//! 備料服務
//!
//! 從文件庫載入資料，呼叫計算引擎，並寫回扣減結果。
//! 只有讀取與寫入會等待 I/O；計算本身是同步的純函數。

use chrono::NaiveDate;
use pantry_calc::{
    DeductionEngine, DeductionPlan, DeductionReport, DishCatalog, ForecastResult,
    LowStockScanner, RequirementAggregator, SuggestionEngine, WriteFailure,
};
use pantry_core::{
    DailyOrder, Dish, DishOrder, InventoryItem, KitchenError, PlanningConfig, Result,
};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::store::KitchenStore;

/// 記錄每日點單的結果
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub order_id: String,
    pub menu_id: String,
    /// true 表示新建，false 表示更新既有點單
    pub created: bool,
    pub deduction: DeductionReport,
}

/// 備料服務
pub struct KitchenPlanner<S> {
    store: S,
    config: PlanningConfig,
}

impl<S: KitchenStore> KitchenPlanner<S> {
    /// 創建新的備料服務
    pub fn new(store: S, config: PlanningConfig) -> Self {
        Self { store, config }
    }

    /// 計算指定週菜單的採購建議
    ///
    /// 任何失敗都包裝為可重試的 `ForecastFailed`。
    pub async fn forecast_for_menu(&self, menu_id: &str) -> Result<ForecastResult> {
        self.run_forecast(menu_id)
            .await
            .map_err(KitchenError::forecast_failed)
    }

    async fn run_forecast(&self, menu_id: &str) -> Result<ForecastResult> {
        tracing::info!("開始預測：週菜單 {}", menu_id);

        let orders: Vec<DailyOrder> = self
            .store
            .list_daily_orders()
            .await?
            .into_iter()
            .filter(|order| order.menu_id == menu_id)
            .collect();

        if orders.is_empty() {
            tracing::info!("週菜單 {} 沒有點單，無需預測", menu_id);
            return Ok(ForecastResult::empty(menu_id.to_string()));
        }

        let catalog = DishCatalog::from_dishes(self.store.list_dishes().await?);
        let inventory = self.store.list_inventory().await?;

        self.forecast_orders(menu_id, &orders, &catalog, &inventory)
    }

    /// 對給定點單計算採購建議（不讀取文件庫）
    pub fn forecast_orders(
        &self,
        menu_id: &str,
        orders: &[DailyOrder],
        catalog: &DishCatalog,
        inventory: &[InventoryItem],
    ) -> Result<ForecastResult> {
        let start_time = std::time::Instant::now();

        let aggregation = RequirementAggregator::aggregate(orders, catalog, &self.config)?;
        let suggestions =
            SuggestionEngine::suggest(&aggregation.requirements, inventory, &self.config);
        let result = ForecastResult::new(menu_id.to_string(), aggregation, suggestions)
            .with_elapsed(start_time.elapsed());

        tracing::info!(
            "預測完成：點單 {} 筆，食材 {} 種，建議 {} 筆，警告 {} 項，耗時 {:?}",
            orders.len(),
            result.requirements.len(),
            result.suggestions.len(),
            result.warnings.len(),
            result.elapsed
        );

        Ok(result)
    }

    /// 低庫存項目
    pub async fn low_stock(&self) -> Result<Vec<InventoryItem>> {
        let inventory = self.store.list_inventory().await?;
        Ok(LowStockScanner::scan(&inventory)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 設定最低庫存量（必須是非負數字）
    pub async fn set_minimum_threshold(&self, stock_item_id: &str, raw: &str) -> Result<Decimal> {
        let minimum = Decimal::from_str(raw.trim())
            .ok()
            .filter(|value| *value >= Decimal::ZERO)
            .ok_or_else(|| KitchenError::InvalidThreshold(raw.to_string()))?;

        self.store
            .update_minimum_threshold(stock_item_id, minimum)
            .await?;
        tracing::info!("庫存項目 {} 最低庫存量設為 {}", stock_item_id, minimum);

        Ok(minimum)
    }

    /// 指定日期週菜單中的菜餚（依菜單順序）
    pub async fn dishes_for_date(&self, date: NaiveDate) -> Result<Vec<Dish>> {
        let menu = self
            .store
            .get_weekly_menu_for_date(date)
            .await?
            .ok_or(KitchenError::NoMenuForDate(date))?;
        let catalog = DishCatalog::from_dishes(self.store.list_dishes().await?);

        Ok(catalog
            .select(&menu.dish_ids)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 記錄每日點單並扣減庫存
    ///
    /// 份數為 0 的行不儲存。同一（日期, 週菜單）已有點單時更新該筆。
    /// 點單儲存與庫存扣減不是原子操作；重複儲存會再次扣減。
    pub async fn record_daily_orders(
        &self,
        date: NaiveDate,
        dish_orders: Vec<DishOrder>,
    ) -> Result<RecordOutcome> {
        let menu = self
            .store
            .get_weekly_menu_for_date(date)
            .await?
            .ok_or(KitchenError::NoMenuForDate(date))?;

        for line in dish_orders.iter().filter(|line| !menu.offers(&line.dish_id)) {
            tracing::warn!("菜餚 {} 不在週菜單 {} 中", line.dish_id, menu.id);
        }

        let (mut order, created) = match self.store.get_daily_order(date, &menu.id).await? {
            Some(existing) => (existing.with_dish_orders(dish_orders), false),
            None => (
                DailyOrder::new(date, menu.id.clone()).with_dish_orders(dish_orders),
                true,
            ),
        };
        order.retain_active();

        self.store.save_daily_order(order.clone()).await?;
        tracing::info!(
            "{}每日點單 {}（{}，週菜單 {}，共 {} 份）",
            if created { "新增" } else { "更新" },
            order.id,
            date,
            menu.id,
            order.total_portions()
        );

        let deduction = self.deduct_and_apply(&order.dish_orders).await?;

        Ok(RecordOutcome {
            order_id: order.id,
            menu_id: menu.id,
            created,
            deduction,
        })
    }

    /// 依點單扣減庫存並寫回
    ///
    /// 讀取失敗時回傳可重試的 `DeductionFailed`；個別寫入失敗只記錄在結果中。
    pub async fn deduct_and_apply(&self, dish_orders: &[DishOrder]) -> Result<DeductionReport> {
        tracing::info!("開始扣減庫存：點單 {} 行", dish_orders.len());
        let start_time = std::time::Instant::now();

        let (catalog, inventory) = self
            .load_deduction_inputs()
            .await
            .map_err(KitchenError::deduction_failed)?;

        let plan = DeductionEngine::deduct(dish_orders, &catalog, &inventory, &self.config);
        let report = self.apply(plan).await;

        tracing::info!(
            "扣減完成：寫入 {} 筆，失敗 {} 筆，待處理問題 {} 項，耗時 {:?}",
            report.applied.len(),
            report.write_failures.len(),
            report.issue_count(),
            start_time.elapsed()
        );

        Ok(report)
    }

    async fn load_deduction_inputs(&self) -> Result<(DishCatalog, Vec<InventoryItem>)> {
        let catalog = DishCatalog::from_dishes(self.store.list_dishes().await?);
        let inventory = self.store.list_inventory().await?;
        Ok((catalog, inventory))
    }

    /// 逐筆寫入扣減，單筆失敗不影響其他項目
    pub async fn apply(&self, plan: DeductionPlan) -> DeductionReport {
        let mut applied = Vec::with_capacity(plan.updates.len());
        let mut write_failures = Vec::new();

        for update in &plan.updates {
            match self
                .store
                .update_inventory_quantity(&update.stock_item_id, update.new_quantity)
                .await
            {
                Ok(()) => {
                    tracing::debug!(
                        "庫存 {}：{} → {}",
                        update.stock_item_id,
                        update.previous_quantity,
                        update.new_quantity
                    );
                    applied.push(update.clone());
                }
                Err(e) => {
                    tracing::warn!("庫存 {} 寫入失敗: {}", update.stock_item_id, e);
                    write_failures.push(WriteFailure {
                        stock_item_id: update.stock_item_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        DeductionReport {
            plan,
            applied,
            write_failures,
        }
    }

    /// 文件庫引用
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 配置引用
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}
