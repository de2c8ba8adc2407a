//! Resource inventory domain logic.
//!
//! Pure logic -- no database access. The status of an inventory item is a
//! function of its quantity and low-stock threshold and is recomputed on
//! every write that touches either field; it is never accepted from a client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health tier of a single inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Good,
    Low,
    Critical,
}

/// Classify an inventory quantity against its low-stock threshold.
///
/// Checked in order: at or below half the threshold is `Critical`, at or
/// below the threshold is `Low`, anything above is `Good`. Total -- the
/// caller validates non-negativity before calling.
pub fn classify(quantity: f64, threshold: f64) -> ResourceStatus {
    if quantity <= threshold * 0.5 {
        ResourceStatus::Critical
    } else if quantity <= threshold {
        ResourceStatus::Low
    } else {
        ResourceStatus::Good
    }
}

/// An inventory item embedded in a workspace.
///
/// Items have no identity outside their workspace; the `id` is only unique
/// within the owning aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub threshold: f64,
    pub status: ResourceStatus,
}

/// Client input for creating an inventory item (also used by bulk replace).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceInput {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub threshold: f64,
}

impl ResourceInput {
    /// Validate the input, collecting one message per offending field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("name must not be empty".to_string());
        }
        if self.quantity < 0.0 || !self.quantity.is_finite() {
            errors.push("quantity must be a non-negative number".to_string());
        }
        if self.unit.trim().is_empty() {
            errors.push("unit must not be empty".to_string());
        }
        if self.threshold < 0.0 || !self.threshold.is_finite() {
            errors.push("threshold must be a non-negative number".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the stored item, assigning a fresh id and deriving the status.
    pub fn into_item(self) -> ResourceItem {
        let status = classify(self.quantity, self.threshold);
        ResourceItem {
            id: Uuid::new_v4(),
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
            threshold: self.threshold,
            status,
        }
    }
}

/// Partial update for an inventory item. Only provided fields are applied;
/// the status is re-derived afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub threshold: Option<f64>,
}

impl ResourceUpdate {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push("name must not be empty".to_string());
            }
        }
        if let Some(q) = self.quantity {
            if q < 0.0 || !q.is_finite() {
                errors.push("quantity must be a non-negative number".to_string());
            }
        }
        if let Some(unit) = &self.unit {
            if unit.trim().is_empty() {
                errors.push("unit must not be empty".to_string());
            }
        }
        if let Some(t) = self.threshold {
            if t < 0.0 || !t.is_finite() {
                errors.push("threshold must be a non-negative number".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merge the provided fields into `item` and recompute its status.
    pub fn apply(self, item: &mut ResourceItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(threshold) = self.threshold {
            item.threshold = threshold;
        }
        item.status = classify(item.quantity, item.threshold);
    }
}

/// Default inventory seeded into every new workspace: (name, unit, threshold).
const DEFAULT_INVENTORY: [(&str, &str, f64); 5] = [
    ("Cement", "bags", 50.0),
    ("Steel Rods", "pieces", 100.0),
    ("Bricks", "pieces", 1000.0),
    ("Sand", "tons", 20.0),
    ("Gravel", "tons", 20.0),
];

/// Build the default inventory for a new workspace.
///
/// All items start at quantity zero and are seeded as `Low` stock awaiting
/// the first delivery; the classifier takes over on the first quantity or
/// threshold change.
pub fn default_resources() -> Vec<ResourceItem> {
    DEFAULT_INVENTORY
        .iter()
        .map(|(name, unit, threshold)| ResourceItem {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            quantity: 0.0,
            unit: (*unit).to_string(),
            threshold: *threshold,
            status: ResourceStatus::Low,
        })
        .collect()
}

/// Aggregated view of a workspace's inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceStatistics {
    pub total_items: usize,
    pub good: usize,
    pub low: usize,
    pub critical: usize,
    pub total_quantity: f64,
}

/// Reduce the current inventory to counts-by-status and a quantity sum.
pub fn statistics(items: &[ResourceItem]) -> ResourceStatistics {
    let mut stats = ResourceStatistics {
        total_items: items.len(),
        good: 0,
        low: 0,
        critical: 0,
        total_quantity: 0.0,
    };
    for item in items {
        match item.status {
            ResourceStatus::Good => stats.good += 1,
            ResourceStatus::Low => stats.low += 1,
            ResourceStatus::Critical => stats.critical += 1,
        }
        stats.total_quantity += item.quantity;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_critical_at_or_below_half_threshold() {
        assert_eq!(classify(0.0, 30.0), ResourceStatus::Critical);
        assert_eq!(classify(15.0, 30.0), ResourceStatus::Critical);
        assert_eq!(classify(10.0, 30.0), ResourceStatus::Critical);
    }

    #[test]
    fn classify_low_between_half_and_full_threshold() {
        assert_eq!(classify(15.1, 30.0), ResourceStatus::Low);
        assert_eq!(classify(20.0, 30.0), ResourceStatus::Low);
        assert_eq!(classify(30.0, 30.0), ResourceStatus::Low);
    }

    #[test]
    fn classify_good_above_threshold() {
        assert_eq!(classify(30.1, 30.0), ResourceStatus::Good);
        assert_eq!(classify(40.0, 30.0), ResourceStatus::Good);
    }

    #[test]
    fn classify_zero_threshold_is_total() {
        // quantity 0 <= 0 * 0.5 -> critical; anything above is good.
        assert_eq!(classify(0.0, 0.0), ResourceStatus::Critical);
        assert_eq!(classify(1.0, 0.0), ResourceStatus::Good);
    }

    #[test]
    fn default_resources_are_five_low_items() {
        let items = default_resources();
        assert_eq!(items.len(), 5);
        for item in &items {
            assert_eq!(item.quantity, 0.0);
            assert_eq!(item.status, ResourceStatus::Low);
        }
        // Ids must be unique within the set.
        let mut ids: Vec<_> = items.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn input_validation_collects_all_field_errors() {
        let input = ResourceInput {
            name: "  ".to_string(),
            quantity: -1.0,
            unit: String::new(),
            threshold: -0.5,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn update_rederives_status() {
        let mut item = ResourceInput {
            name: "Paint".to_string(),
            quantity: 20.0,
            unit: "L".to_string(),
            threshold: 30.0,
        }
        .into_item();
        assert_eq!(item.status, ResourceStatus::Low);

        ResourceUpdate {
            name: None,
            quantity: Some(10.0),
            unit: None,
            threshold: None,
        }
        .apply(&mut item);
        assert_eq!(item.status, ResourceStatus::Critical);

        ResourceUpdate {
            name: None,
            quantity: Some(40.0),
            unit: None,
            threshold: None,
        }
        .apply(&mut item);
        assert_eq!(item.status, ResourceStatus::Good);
    }

    #[test]
    fn statistics_counts_by_status_and_sums_quantity() {
        let items = vec![
            ResourceInput {
                name: "A".into(),
                quantity: 40.0,
                unit: "kg".into(),
                threshold: 30.0,
            }
            .into_item(),
            ResourceInput {
                name: "B".into(),
                quantity: 20.0,
                unit: "kg".into(),
                threshold: 30.0,
            }
            .into_item(),
            ResourceInput {
                name: "C".into(),
                quantity: 5.0,
                unit: "kg".into(),
                threshold: 30.0,
            }
            .into_item(),
        ];
        let stats = statistics(&items);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.good, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.total_quantity, 65.0);
    }
}
