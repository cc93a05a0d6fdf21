//! Property-based tests for the economy, the auto latch and passive production.

mod common;

use chrono::TimeDelta;
use common::*;
use ladder_core::{
    economy::{max_affordable, upgrade_cost},
    ledger::ResourceLedger,
    simulation::passive::PassiveProducerState,
    LadderError, SimulationBuilder,
};
use ladder_schemas::{cost::CostTable, production::PassiveProductionDefinition};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ===========================================================================
// Generators
// ===========================================================================

const RESOURCES: [&str; 3] = ["coins", "coal", "ore"];

fn arb_cost() -> impl Strategy<Value = CostTable> {
    proptest::collection::vec(0..60u64, RESOURCES.len()).prop_map(|amounts| {
        CostTable::new(RESOURCES.iter().zip(amounts).map(|(r, a)| (r.to_string(), a)))
    })
}

fn arb_ledger() -> impl Strategy<Value = ResourceLedger> {
    proptest::collection::vec(0..2_000u64, RESOURCES.len()).prop_map(|balances| {
        ResourceLedger::from_balances(
            RESOURCES
                .iter()
                .zip(balances)
                .map(|(r, b)| (r.to_string(), b))
                .collect::<BTreeMap<_, _>>(),
        )
    })
}

#[derive(Debug, Clone)]
enum Op {
    Buy(usize, usize),
    Upgrade(usize, usize),
    ToggleBuyMax,
    Tick(i64),
    SaveLoad,
}

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            (0..2usize, 0..2usize).prop_map(|(i, w)| Op::Buy(i, w)),
            (0..2usize, 0..2usize).prop_map(|(i, w)| Op::Upgrade(i, w)),
            Just(Op::ToggleBuyMax),
            (1..4_000i64).prop_map(Op::Tick),
            Just(Op::SaveLoad),
        ],
        1..=max_ops,
    )
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Buy-max is the largest count every constraining resource can cover.
    #[test]
    fn buy_max_is_the_unique_maximum(cost in arb_cost(), ledger in arb_ledger()) {
        let n = max_affordable(&cost, &ledger);
        let constraining: Vec<_> = cost.iter().filter(|e| e.amount > 0).collect();

        if constraining.is_empty() {
            prop_assert_eq!(n, 0);
        } else {
            for entry in &constraining {
                prop_assert!(n * entry.amount <= ledger.balance(&entry.resource));
            }
            prop_assert!(constraining
                .iter()
                .any(|e| (n + 1) * e.amount > ledger.balance(&e.resource)));
        }
    }

    /// Scaled upgrade costs never shrink, and grow strictly once the multiplier is at least 2.
    #[test]
    fn upgrade_cost_grows_with_tier(
        amount in 1..1_000u64,
        slow in 1.0..2.0f64,
        fast in 2.0..4.0f64,
        tier in 1..20u32,
    ) {
        let base = CostTable::new([("coins", amount)]);
        let slow_now = upgrade_cost(&base, slow, tier).amount_of("coins");
        let slow_next = upgrade_cost(&base, slow, tier + 1).amount_of("coins");
        prop_assert!(slow_next >= slow_now);

        let fast_now = upgrade_cost(&base, fast, tier).amount_of("coins");
        let fast_next = upgrade_cost(&base, fast, tier + 1).amount_of("coins");
        prop_assert!(fast_next > fast_now);
    }

    /// Operations either succeed with the expected debit or fail with `CannotAfford`
    /// and change nothing; tiers move by one and auto flags never reset.
    #[test]
    fn operations_keep_the_economy_consistent(ops in arb_ops(40), coins in 0..500u64) {
        let mut engine = SimulationBuilder::new()
            .with_industries(industries())
            .with_starting_resources(resources(&[("coins", coins), ("coal", 20)]))
            .with_passive_production(vec![coin_trickle()])
            .starting_at(t(0))
            .build()
            .unwrap();
        let mut now = 0i64;

        for op in ops {
            let autos_before: Vec<bool> = engine
                .industries()
                .iter()
                .flat_map(|i| i.workers.iter().map(|w| w.auto))
                .collect();

            match op {
                Op::Buy(industry, worker) => {
                    let ledger_before = engine.ledger().clone();
                    let owned_before = engine.industries()[industry].workers[worker].owned;
                    let cost = engine.industries()[industry].workers[worker].definition.cost.clone();
                    let expected = if engine.buy_mode_max() {
                        max_affordable(&cost, &ledger_before)
                    } else if ledger_before.covers(&cost, 1) {
                        1
                    } else {
                        0
                    };

                    match engine.buy_worker(industry, worker) {
                        Ok(count) => {
                            prop_assert_eq!(count, expected);
                            prop_assert_eq!(
                                engine.industries()[industry].workers[worker].owned,
                                owned_before + count
                            );
                            for entry in cost.iter() {
                                prop_assert_eq!(
                                    engine.ledger().balance(&entry.resource),
                                    ledger_before.balance(&entry.resource) - entry.amount * count
                                );
                            }
                        }
                        Err(err) => {
                            prop_assert!(matches!(err, LadderError::CannotAfford { .. }), "expected CannotAfford");
                            prop_assert_eq!(expected, 0);
                            prop_assert_eq!(engine.ledger(), &ledger_before);
                        }
                    }
                }
                Op::Upgrade(industry, worker) => {
                    let ledger_before = engine.ledger().clone();
                    let tier_before = engine.industries()[industry].workers[worker].tier;
                    let cost = engine.upgrade_cost(industry, worker);

                    match engine.upgrade_worker(industry, worker) {
                        Ok(tier) => {
                            prop_assert_eq!(tier, tier_before + 1);
                            for entry in cost.iter() {
                                prop_assert_eq!(
                                    engine.ledger().balance(&entry.resource),
                                    ledger_before.balance(&entry.resource) - entry.amount
                                );
                            }
                        }
                        Err(err) => {
                            prop_assert!(matches!(err, LadderError::CannotAfford { .. }), "expected CannotAfford");
                            prop_assert!(!ledger_before.covers(&cost, 1));
                            prop_assert_eq!(engine.ledger(), &ledger_before);
                            prop_assert_eq!(
                                engine.industries()[industry].workers[worker].tier,
                                tier_before
                            );
                        }
                    }
                }
                Op::ToggleBuyMax => {
                    engine.toggle_buy_max();
                }
                Op::Tick(step) => {
                    now += step;
                    engine.update(t(now));
                }
                Op::SaveLoad => {
                    let bytes = engine.save().unwrap();
                    engine.load(&bytes).unwrap();
                }
            }

            let autos_after: Vec<bool> = engine
                .industries()
                .iter()
                .flat_map(|i| i.workers.iter().map(|w| w.auto))
                .collect();
            for (before, after) in autos_before.iter().zip(&autos_after) {
                prop_assert!(!before || *after);
            }
        }
    }

    /// Passive yield after T is floor(T / interval) × quantity however T is split into ticks.
    #[test]
    fn passive_yield_ignores_tick_partition(
        interval_ms in 1..5_000i64,
        quant in 1..10u64,
        offsets in proptest::collection::vec(0..120_000i64, 0..30),
        total_ms in 0..120_000i64,
    ) {
        let definition = PassiveProductionDefinition {
            resource: "coins".to_string(),
            prod_rate: TimeDelta::milliseconds(interval_ms),
            prod_quant: quant,
        };
        let mut producer = PassiveProducerState::new(definition, t(0));
        let mut ledger = ResourceLedger::new();

        let mut offsets = offsets;
        offsets.retain(|offset| *offset <= total_ms);
        offsets.sort_unstable();
        offsets.push(total_ms);
        for offset in offsets {
            producer.catch_up(t(offset), &mut ledger);
        }

        let expected = (total_ms / interval_ms) as u64 * quant;
        prop_assert_eq!(ledger.balance("coins"), expected);
    }
}
