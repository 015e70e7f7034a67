use super::{
    crop::RiceTopDressingRule, nitrogen::NitrogenRule, ph::PhRule, phosphorus::PhosphorusRule,
    potassium::PotassiumRule, FertilizerRule,
};
use crate::logic::calculations::{clamp_score, outside, round_to};
use crate::models::{
    ApplicationScheduleEntry, DecisionTrace, FertilizerLine, FertilizerPlan, FertilizerRequest,
    SoilAnalysis,
};
use crate::pricing::PricingTable;

pub struct FertilizerPlanner {
    rules: Vec<Box<dyn FertilizerRule>>,
    pricing: PricingTable,
}

impl FertilizerPlanner {
    pub fn new(pricing: PricingTable) -> Self {
        let rules: Vec<Box<dyn FertilizerRule>> = vec![
            Box::new(NitrogenRule),
            Box::new(PhosphorusRule),
            Box::new(PotassiumRule),
            Box::new(PhRule),
            Box::new(RiceTopDressingRule),
        ];

        Self { rules, pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn plan(&self, request: &FertilizerRequest) -> FertilizerPlan {
        let soil = &request.soil_analysis;
        let mut fertilizers: Vec<FertilizerLine> = Vec::new();
        let mut trace = DecisionTrace::default();
        let mut cost = 0.0;

        for rule in &self.rules {
            if let Some(amendment) = rule.evaluate(&request.crop_type, soil) {
                let line = amendment.line;
                cost += line.amount * self.pricing.cost_per_kg(line.fertilizer_type);
                tracing::debug!(
                    rule = rule.id(),
                    fertilizer = %line.fertilizer_type,
                    amount = line.amount,
                    "Fertilizer rule fired"
                );
                trace.push(amendment.trigger, line.fertilizer_type.as_str());
                fertilizers.push(line);
            }
        }

        let mut confidence = soil_confidence(soil);
        let mut total_cost = round_to(cost, 2);

        if cost > request.budget && cost > 0.0 {
            let scale = request.budget / cost;
            tracing::debug!(
                cost,
                budget = request.budget,
                scale,
                "Plan exceeds budget, scaling amounts"
            );
            for line in &mut fertilizers {
                line.amount *= scale;
            }
            total_cost = request.budget;
            confidence = clamp_score(confidence as i32 - 10, 60, 95);
        }

        let schedule = build_schedule(&fertilizers, request);

        FertilizerPlan {
            fertilizers,
            trace,
            confidence,
            total_cost,
            currency: self.pricing.currency.clone(),
            schedule,
        }
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for FertilizerPlanner {
    fn default() -> Self {
        Self::new(PricingTable::default())
    }
}

fn soil_confidence(soil: &SoilAnalysis) -> u8 {
    let mut confidence = 80;

    if outside(soil.ph, 5.0, 8.0) {
        confidence -= 15;
    }
    if outside(soil.nitrogen, 10.0, 100.0) {
        confidence -= 10;
    }
    if outside(soil.phosphorus, 5.0, 50.0) {
        confidence -= 10;
    }
    if outside(soil.potassium, 10.0, 60.0) {
        confidence -= 10;
    }

    clamp_score(confidence, 60, 95)
}

fn build_schedule(
    fertilizers: &[FertilizerLine],
    request: &FertilizerRequest,
) -> Vec<ApplicationScheduleEntry> {
    let mut schedule: Vec<ApplicationScheduleEntry> = fertilizers
        .iter()
        .map(|line| ApplicationScheduleEntry {
            date: line.timing.date_from(request.planting_date),
            fertilizer: line.fertilizer_type,
            amount: line.amount,
            method: line.application_method.clone(),
            notes: format!("{}: {}", line.timing, line.reason),
        })
        .collect();

    schedule.sort_by_key(|entry| entry.date);
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationTiming, FertilizerType};
    use chrono::NaiveDate;

    fn request(crop: &str, n: f64, p: f64, k: f64, ph: f64, budget: f64) -> FertilizerRequest {
        FertilizerRequest {
            crop_type: crop.into(),
            soil_analysis: SoilAnalysis::new(n, p, k, ph),
            planting_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            budget,
        }
    }

    #[test]
    fn budget_scales_urea_to_exact_budget() {
        let plan = FertilizerPlanner::default().plan(&request("wheat", 20.0, 30.0, 30.0, 7.0, 5.0));

        assert_eq!(plan.fertilizers.len(), 1);
        let urea = &plan.fertilizers[0];
        assert_eq!(urea.fertilizer_type, FertilizerType::Urea);
        // 60 kg * 0.5 = 30, scaled by 5/30
        assert!((urea.amount - 10.0).abs() < 1e-9);
        assert_eq!(plan.total_cost, 5.0);
        assert_eq!(plan.confidence, 70);
        assert!((plan.schedule[0].amount - 10.0).abs() < 1e-9);
    }

    #[test]
    fn within_budget_keeps_amounts() {
        let plan =
            FertilizerPlanner::default().plan(&request("wheat", 20.0, 30.0, 30.0, 7.0, 1000.0));
        assert_eq!(plan.fertilizers[0].amount, 60.0);
        assert_eq!(plan.total_cost, 30.0);
        assert_eq!(plan.confidence, 80);
    }

    #[test]
    fn budget_invariant_holds_across_budgets() {
        let planner = FertilizerPlanner::default();
        // Urea 100kg (50) + DAP 50kg (40) + MOP 60kg (36) + Lime 200kg (40) + NPK 25kg (17.5)
        let unconstrained = planner
            .plan(&request("rice", 0.0, 0.0, 0.0, 4.5, 1.0e9))
            .total_cost;
        assert!((unconstrained - 183.5).abs() < 1e-9);

        for budget in [0.0, 0.01, 3.33, 50.0, 183.49, 183.5, 500.0] {
            let plan = planner.plan(&request("rice", 0.0, 0.0, 0.0, 4.5, budget));
            assert!(plan.total_cost <= budget + 1e-6, "budget {}", budget);
            if unconstrained > budget {
                assert_eq!(plan.total_cost, budget);
                let recomputed: f64 = plan
                    .fertilizers
                    .iter()
                    .map(|l| l.amount * planner.pricing().cost_per_kg(l.fertilizer_type))
                    .sum();
                assert!((recomputed - budget).abs() < 1e-6, "budget {}", budget);
            }
        }
    }

    #[test]
    fn rules_fire_in_order_with_trace() {
        let plan =
            FertilizerPlanner::default().plan(&request("rice", 10.0, 10.0, 10.0, 5.0, 10_000.0));
        let types: Vec<_> = plan.fertilizers.iter().map(|l| l.fertilizer_type).collect();
        assert_eq!(
            types,
            vec![
                FertilizerType::Urea,
                FertilizerType::Dap,
                FertilizerType::Mop,
                FertilizerType::Lime,
                FertilizerType::Npk,
            ]
        );
        assert_eq!(
            plan.trace.render(),
            "Low N → Urea | Low P → DAP | Low K → MOP | Acidic pH → Lime | Rice crop → NPK"
        );
    }

    #[test]
    fn high_nitrogen_and_alkaline_soil() {
        let plan =
            FertilizerPlanner::default().plan(&request("wheat", 90.0, 30.0, 30.0, 8.0, 10_000.0));
        let types: Vec<_> = plan.fertilizers.iter().map(|l| l.fertilizer_type).collect();
        assert_eq!(types, vec![FertilizerType::Organic, FertilizerType::Sulfur]);
        // 20 * 0.3 + 50 * 0.4
        assert_eq!(plan.total_cost, 26.0);
    }

    #[test]
    fn no_rule_fires_is_valid() {
        let plan =
            FertilizerPlanner::default().plan(&request("wheat", 50.0, 30.0, 30.0, 6.5, 100.0));
        assert!(plan.fertilizers.is_empty());
        assert!(plan.schedule.is_empty());
        assert!(plan.trace.is_empty());
        assert_eq!(plan.total_cost, 0.0);
        assert_eq!(plan.confidence, 80);
    }

    #[test]
    fn schedule_sorted_by_date() {
        let plan =
            FertilizerPlanner::default().plan(&request("rice", 10.0, 10.0, 10.0, 5.0, 10_000.0));
        assert_eq!(plan.schedule.len(), plan.fertilizers.len());
        assert!(plan.schedule.windows(2).all(|w| w[0].date <= w[1].date));

        let planting = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            plan.schedule.first().unwrap().date,
            ApplicationTiming::PrePlanting.date_from(planting)
        );
        let last = plan.schedule.last().unwrap();
        assert_eq!(last.fertilizer, FertilizerType::Npk);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 7, 16).unwrap());
    }

    #[test]
    fn confidence_penalties() {
        let planner = FertilizerPlanner::default();
        // pH 9 (-15), N 5 (-10), P 60 (-10), K 70 (-10) => 35, clamped to 60
        let plan = planner.plan(&request("wheat", 5.0, 60.0, 70.0, 9.0, 10_000.0));
        assert_eq!(plan.confidence, 60);

        // pH 4.5 only (-15)
        let plan = planner.plan(&request("wheat", 50.0, 30.0, 30.0, 4.5, 10_000.0));
        assert_eq!(plan.confidence, 65);
    }

    #[test]
    fn budget_penalty_reclamps() {
        let plan = FertilizerPlanner::default().plan(&request("wheat", 5.0, 60.0, 70.0, 9.0, 1.0));
        assert_eq!(plan.confidence, 60);
        assert_eq!(plan.total_cost, 1.0);
    }

    #[test]
    fn custom_pricing_table() {
        let pricing = PricingTable {
            currency: "USD".into(),
            urea: 1.0,
            ..PricingTable::default()
        };
        let plan = FertilizerPlanner::new(pricing).plan(&request("wheat", 20.0, 30.0, 30.0, 7.0, 1000.0));
        assert_eq!(plan.total_cost, 60.0);
        assert_eq!(plan.currency, "USD");
    }

    #[test]
    fn list_rules_in_evaluation_order() {
        let ids: Vec<_> = FertilizerPlanner::default()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec!["nitrogen", "phosphorus", "potassium", "ph", "rice_top_dressing"]
        );
    }
}
