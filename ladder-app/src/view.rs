use crate::control::Selection;
use chrono::{DateTime, Utc};
use ladder_core::SimulationEngine;
use ladder_schemas::{cost::CostTable, duration::format_duration};

/// Renders the selected industry, its workers and the resource balances as plain text.
pub fn status_lines(engine: &SimulationEngine, selection: Selection, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    let tabs: Vec<String> = engine
        .industries()
        .iter()
        .enumerate()
        .map(|(i, industry)| {
            if i == selection.industry {
                format!("[{}]", industry.display_name())
            } else {
                format!(" {} ", industry.display_name())
            }
        })
        .collect();
    lines.push(tabs.join(" "));

    lines.push(format!("Resources: {}", engine.resource_summary().join(", ")));

    if let Some(industry) = engine.industries().get(selection.industry) {
        for (j, worker) in industry.workers.iter().enumerate() {
            let marker = if j == selection.worker { '>' } else { ' ' };
            let progress = match worker.ends_at() {
                Some(ends_at) if ends_at > now => format!("running, {} left", format_duration(ends_at - now)),
                Some(_) => "finishing".to_string(),
                None => "idle".to_string(),
            };
            let auto = if worker.auto { " auto" } else { "" };
            lines.push(format!(
                "{} {} x{} tier {} ({}){} | cost {} | upgrade {}",
                marker,
                worker.definition.worker_name,
                worker.owned,
                worker.tier,
                progress,
                auto,
                describe_cost(&worker.definition.cost),
                describe_cost(&engine.upgrade_cost(selection.industry, j)),
            ));
        }
    }

    let mut footer = engine.buy_mode_label().to_string();
    if engine.dev_mode() {
        footer.push_str(" | developer mode");
    }
    lines.push(footer);
    lines
}

fn describe_cost(cost: &CostTable) -> String {
    cost.iter()
        .map(|entry| format!("{} {}", entry.amount, entry.resource))
        .collect::<Vec<_>>()
        .join(" + ")
}
