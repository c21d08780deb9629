//! Constants command implementation

use crate::cli::ConstantsArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::{AllocationInfo, CoefficientOutput, ConstantsOutput};
use crate::storage;
use anyhow::{Context, Result};
use boxcpq_core::config::LayeredConfig;
use boxcpq_core::models::FixedCostAllocation;
use tabled::Tabled;

#[derive(Tabled)]
struct CoefficientRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: f64,
}

pub async fn execute(args: ConstantsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let store = storage::open_store(config).await?;
    if args.refresh {
        store.invalidate();
    }

    if let Some(name) = args.name {
        let value = store
            .get_coefficient(&name)
            .await
            .with_context(|| format!("Failed to read coefficient '{}'", name))?;

        if output.is_json() {
            return output.result(CoefficientOutput { name, value });
        }
        output.kv(name, value);
        return Ok(());
    }

    let snapshot = store
        .snapshot()
        .await
        .context("Failed to fetch coefficient tables")?;

    // A missing or zero throughput only blocks the allocation, not the listing
    let allocation = match snapshot.fixed_cost_allocation() {
        Ok(allocation) => allocation_info(&allocation),
        Err(e) => {
            output.warning(format!("Fixed-cost allocation unavailable: {}", e));
            None
        }
    };

    if output.is_json() {
        return output.result(ConstantsOutput {
            source: store.source_description(),
            constants: snapshot
                .coefficients
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            fixed_costs: snapshot.fixed_costs.clone(),
            allocation,
        });
    }

    output.kv("Source", store.source_description());

    output.section("Constants");
    output.table(
        snapshot
            .coefficients
            .iter()
            .map(|(name, value)| CoefficientRow {
                name: name.to_string(),
                value,
            })
            .collect(),
    );

    output.section("Fixed costs (monthly)");
    output.table(
        snapshot
            .fixed_costs
            .iter()
            .map(|(name, amount)| CoefficientRow {
                name: name.clone(),
                value: *amount,
            })
            .collect(),
    );

    if let Some(allocation) = allocation {
        output.section("Allocation");
        output.kv("Total fixed cost", money(allocation.total_fixed_cost));
        output.kv("Boxes per month", allocation.units_per_month);
        output.kv("Fixed cost per box", money(allocation.fixed_cost_per_unit));
    }

    Ok(())
}

fn allocation_info(allocation: &FixedCostAllocation) -> Option<AllocationInfo> {
    let fixed_cost_per_unit = allocation.per_unit().ok()?;
    Some(AllocationInfo {
        total_fixed_cost: allocation.total_fixed_cost,
        units_per_month: allocation.units_per_month,
        fixed_cost_per_unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_info_requires_throughput() {
        let empty = FixedCostAllocation {
            total_fixed_cost: 1000.0,
            units_per_month: 0.0,
        };
        assert!(allocation_info(&empty).is_none());

        let info = allocation_info(&FixedCostAllocation {
            total_fixed_cost: 1000.0,
            units_per_month: 400.0,
        })
        .unwrap();
        assert_eq!(info.fixed_cost_per_unit, 2.5);
    }
}
