// Solver adapters module

pub mod coin_cbc_oracle;
pub mod factory;
pub mod highs_oracle;

pub use coin_cbc_oracle::CoinCbcOracle;
pub use factory::OracleFactory;
pub use highs_oracle::HighsOracle;
