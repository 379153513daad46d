use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oppidum_types::{
    errors::GameError,
    resources::{Resource, ResourceMap},
};

use crate::economy;

/// The balance of a single resource kind in a village.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceBalance {
    pub kind: Resource,
    pub amount: f64,
    pub capacity: f64,
    pub last_accrual: DateTime<Utc>,
}

/// Per-village resource balances, exactly one per resource kind.
///
/// Mutations keep two invariants: `amount <= capacity` at all times,
/// and `last_accrual` never moves backwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceStocks {
    balances: [ResourceBalance; 4],
}

impl ResourceStocks {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        let balances = Resource::ALL.map(|kind| ResourceBalance {
            kind,
            amount: 0.0,
            capacity: economy::BASE_STORAGE_CAPACITY,
            last_accrual: created_at,
        });

        Self { balances }
    }

    pub fn balance(&self, kind: Resource) -> &ResourceBalance {
        &self.balances[Self::index(kind)]
    }

    fn balance_mut(&mut self, kind: Resource) -> &mut ResourceBalance {
        &mut self.balances[Self::index(kind)]
    }

    fn index(kind: Resource) -> usize {
        match kind {
            Resource::Wood => 0,
            Resource::Clay => 1,
            Resource::Iron => 2,
            Resource::Crop => 3,
        }
    }

    pub fn amounts(&self) -> ResourceMap {
        let mut amounts = ResourceMap::default();
        for balance in &self.balances {
            *amounts.amount_mut(balance.kind) = balance.amount;
        }
        amounts
    }

    /// True iff every requested amount is covered by the current
    /// balance. Kinds with a zero request are unconstrained.
    pub fn can_afford(&self, costs: &ResourceMap) -> bool {
        Resource::ALL
            .iter()
            .all(|&kind| self.balance(kind).amount >= costs.amount(kind))
    }

    /// Debits `costs` from the balances. The affordability check runs
    /// before the first write, so a failure leaves every balance
    /// untouched.
    pub fn spend(&mut self, costs: &ResourceMap) -> Result<(), GameError> {
        if !self.can_afford(costs) {
            return Err(GameError::NotEnoughResources);
        }

        for kind in Resource::ALL {
            self.balance_mut(kind).amount -= costs.amount(kind);
        }

        Ok(())
    }

    /// Credits `amounts`, clamping each balance at its storage
    /// capacity. Overflow is discarded, not an error.
    pub fn add(&mut self, amounts: &ResourceMap) {
        for kind in Resource::ALL {
            let balance = self.balance_mut(kind);
            balance.amount = (balance.amount + amounts.amount(kind)).min(balance.capacity);
        }
    }

    /// Integrates production since the last accrual into the balances.
    /// `rates_per_hour` is the aggregated hourly production per kind.
    ///
    /// Idempotent for a repeated `now`: the timestamp is advanced even
    /// when the amount does not change, so elapsed time is never
    /// counted twice. A `now` earlier than `last_accrual` is ignored to
    /// keep the timestamp monotonic.
    pub fn accrue(&mut self, rates_per_hour: &ResourceMap, now: DateTime<Utc>) {
        for kind in Resource::ALL {
            let balance = self.balance_mut(kind);
            if now < balance.last_accrual {
                continue;
            }

            let elapsed_secs = (now - balance.last_accrual).num_seconds() as f64;
            let produced = rates_per_hour.amount(kind) / 3600.0 * elapsed_secs;

            balance.amount = (balance.amount + produced).min(balance.capacity);
            balance.last_accrual = now;
        }
    }

    /// Replaces the capacity of one resource kind. A shrink below the
    /// current amount clamps the amount down rather than leaving an
    /// over-full store.
    pub fn set_capacity(&mut self, kind: Resource, capacity: f64) {
        let balance = self.balance_mut(kind);
        balance.capacity = capacity;
        balance.amount = balance.amount.min(capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn stocks_with(wood: f64) -> ResourceStocks {
        let mut stocks = ResourceStocks::new(Utc::now());
        stocks.add(&ResourceMap::new(wood, 0.0, 0.0, 0.0));
        stocks
    }

    #[test]
    fn test_spend_then_can_afford_same_costs_is_false() {
        let mut stocks = stocks_with(500.0);
        let costs = ResourceMap::new(500.0, 0.0, 0.0, 0.0);

        assert!(stocks.can_afford(&costs));
        stocks.spend(&costs).unwrap();
        assert!(
            !stocks.can_afford(&costs),
            "resources must be fully consumed"
        );
    }

    #[test]
    fn test_spend_fails_atomically() {
        let mut stocks = ResourceStocks::new(Utc::now());
        stocks.add(&ResourceMap::new(100.0, 100.0, 0.0, 0.0));

        let costs = ResourceMap::new(50.0, 50.0, 10.0, 0.0);
        let result = stocks.spend(&costs);

        assert!(matches!(result, Err(GameError::NotEnoughResources)));
        assert_eq!(
            stocks.balance(Resource::Wood).amount,
            100.0,
            "no partial debit on failure"
        );
        assert_eq!(stocks.balance(Resource::Clay).amount, 100.0);
    }

    #[test]
    fn test_add_clamps_at_capacity() {
        let mut stocks = stocks_with(950.0);

        stocks.add(&ResourceMap::new(100.0, 0.0, 0.0, 0.0));
        assert_eq!(
            stocks.balance(Resource::Wood).amount,
            1000.0,
            "base capacity caps the credit"
        );

        stocks.add(&ResourceMap::new(1_000_000.0, 0.0, 0.0, 0.0));
        assert_eq!(stocks.balance(Resource::Wood).amount, 1000.0);
    }

    #[test]
    fn test_accrue_integrates_elapsed_time() {
        let start = Utc::now();
        let mut stocks = ResourceStocks::new(start);
        let rates = ResourceMap::new(36.0, 0.0, 0.0, 0.0); // 36/h = 0.01/s

        stocks.accrue(&rates, start + Duration::seconds(1000));
        assert!((stocks.balance(Resource::Wood).amount - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_accrue_is_idempotent_at_same_now() {
        let start = Utc::now();
        let now = start + Duration::seconds(3600);
        let mut stocks = ResourceStocks::new(start);
        let rates = ResourceMap::new(30.0, 0.0, 0.0, 0.0);

        stocks.accrue(&rates, now);
        let after_first = stocks.balance(Resource::Wood).amount;

        stocks.accrue(&rates, now);
        assert_eq!(
            stocks.balance(Resource::Wood).amount,
            after_first,
            "second accrual at the same instant must not add anything"
        );
    }

    #[test]
    fn test_accrue_never_moves_timestamp_backwards() {
        let start = Utc::now();
        let mut stocks = ResourceStocks::new(start);
        let rates = ResourceMap::new(30.0, 0.0, 0.0, 0.0);

        stocks.accrue(&rates, start - Duration::seconds(60));
        assert_eq!(stocks.balance(Resource::Wood).last_accrual, start);
        assert_eq!(stocks.balance(Resource::Wood).amount, 0.0);
    }

    #[test]
    fn test_capacity_shrink_clamps_amount() {
        let mut stocks = stocks_with(900.0);

        stocks.set_capacity(Resource::Wood, 500.0);
        assert_eq!(stocks.balance(Resource::Wood).capacity, 500.0);
        assert_eq!(stocks.balance(Resource::Wood).amount, 500.0);
    }
}
