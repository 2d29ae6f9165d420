use crate::domain::{
    model::{Backend, OracleConfig},
    oracle::SolverOracle,
};
use crate::solver::{CoinCbcOracle, HighsOracle};
use std::sync::Arc;

/// Factory for creating oracle instances based on configuration
pub struct OracleFactory;

impl OracleFactory {
    /// Create the oracle for a configuration's backend choice
    pub fn for_config(config: &OracleConfig) -> Arc<dyn SolverOracle> {
        Self::from_backend(config.backend)
    }

    /// Create the oracle for a specific backend. `Auto` resolves to HiGHS.
    pub fn from_backend(backend: Backend) -> Arc<dyn SolverOracle> {
        match backend {
            Backend::Auto => Arc::new(HighsOracle::new()),
            Backend::Cbc => Arc::new(CoinCbcOracle::new()),
            Backend::Highs => Arc::new(HighsOracle::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_to_highs() {
        let config = OracleConfig::default();
        assert_eq!(OracleFactory::for_config(&config).name(), "HiGHS");
        assert_eq!(OracleFactory::from_backend(Backend::Highs).name(), "HiGHS");
        assert_eq!(
            OracleFactory::from_backend(Backend::Cbc).name(),
            "COIN-OR CBC"
        );
    }
}
