use http::Method;
use rand::Rng;

use crate::error::{Error, Result};

/// One request template the generator may issue: method, path relative to
/// the base URL, and a relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub method: Method,
    pub path: String,
    pub weight: u32,
}

impl Scenario {
    pub fn new(method: Method, path: &str, weight: u32) -> Self {
        Self {
            method,
            path: path.to_string(),
            weight,
        }
    }
}

/// A validated, ordered scenario list with its precomputed weight total.
///
/// Immutable after construction; workers share it read-only for the whole
/// run, so `pick` needs no synchronization.
#[derive(Debug, Clone)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
    total_weight: u64,
}

impl Catalog {
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        for s in &scenarios {
            if s.weight == 0 {
                return Err(Error::ZeroWeight {
                    method: s.method.to_string(),
                    path: s.path.clone(),
                });
            }
        }

        let total_weight = scenarios.iter().map(|s| u64::from(s.weight)).sum();

        Ok(Self {
            scenarios,
            total_weight,
        })
    }

    /// The builtin request mix: mostly menu reads with a tail of analytics
    /// lookups.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Scenario::new(Method::GET, "/Menu", 60),
            Scenario::new(Method::GET, "/analytics/summary", 15),
            Scenario::new(Method::GET, "/analytics/usage", 15),
            Scenario::new(Method::GET, "/analytics/errors", 10),
        ])
        .unwrap_or_else(|err| panic!("builtin catalog invalid: {err}"))
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Pick one scenario with probability `weight / total_weight`,
    /// independent across calls.
    ///
    /// Draws a pivot in `[1, total]` and walks the cumulative weights. The
    /// trailing fallback cannot trigger with integer weights; it is kept as
    /// a defensive default rather than an assertion.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Scenario {
        let pivot = rng.random_range(1..=self.total_weight);

        let mut running = 0u64;
        for scenario in &self.scenarios {
            running += u64::from(scenario.weight);
            if pivot <= running {
                return scenario;
            }
        }

        &self.scenarios[self.scenarios.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::Error;
    use rand::SeedableRng as _;
    use rand::rngs::SmallRng;
    use std::collections::HashMap;

    #[test]
    fn rejects_empty_catalog() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
    }

    #[test]
    fn rejects_zero_weight() {
        let err = Catalog::new(vec![
            Scenario::new(Method::GET, "/a", 1),
            Scenario::new(Method::GET, "/b", 0),
        ])
        .unwrap_err();

        match err {
            Error::ZeroWeight { path, .. } => assert_eq!(path, "/b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builtin_catalog_totals_100() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.total_weight(), 100);
        assert_eq!(catalog.scenarios().len(), 4);
        assert_eq!(catalog.scenarios()[0].path, "/Menu");
    }

    #[test]
    fn pick_respects_weights_with_fixed_seed() {
        let catalog = Catalog::new(vec![
            Scenario::new(Method::GET, "/A", 60),
            Scenario::new(Method::GET, "/B", 40),
        ])
        .unwrap();

        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts: HashMap<String, u64> = HashMap::new();

        let draws = 10_000u64;
        for _ in 0..draws {
            let s = catalog.pick(&mut rng);
            *counts.entry(s.path.clone()).or_insert(0) += 1;
        }

        let a = counts.get("/A").copied().unwrap_or(0);
        let b = counts.get("/B").copied().unwrap_or(0);
        assert_eq!(a + b, draws);

        // 60/40 split within +/-2% of the total draws.
        let tolerance = (draws as f64 * 0.02) as u64;
        assert!(
            a.abs_diff(6_000) <= tolerance,
            "expected /A close to 6000, got {a}"
        );
        assert!(
            b.abs_diff(4_000) <= tolerance,
            "expected /B close to 4000, got {b}"
        );
    }

    #[test]
    fn pick_reaches_every_scenario() {
        let catalog = Catalog::builtin();

        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen: HashMap<String, u64> = HashMap::new();
        for _ in 0..5_000 {
            let s = catalog.pick(&mut rng);
            *seen.entry(s.path.clone()).or_insert(0) += 1;
        }

        for scenario in catalog.scenarios() {
            assert!(
                seen.contains_key(&scenario.path),
                "scenario {} never selected",
                scenario.path
            );
        }
    }

    #[test]
    fn single_entry_catalog_always_picked() {
        let catalog = Catalog::new(vec![Scenario::new(Method::GET, "/only", 3)]).unwrap();

        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(catalog.pick(&mut rng).path, "/only");
        }
    }
}
