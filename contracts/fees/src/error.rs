use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Caller is not an admin: {role} required")]
    Unauthorized { role: String },

    #[error("Basis points value exceeds maximum! {basis_points} > {max_fee_basis_points}")]
    BasisPointsExceeded {
        basis_points: u64,
        max_fee_basis_points: u64,
    },

    #[error("Max fee basis points {max_fee_basis_points} exceeds divisor {divisor}")]
    MaxBasisPointsAboveDivisor {
        max_fee_basis_points: u64,
        divisor: u64,
    },

    #[error("Invalid USD exchange rate: use None to clear a rate instead of zero")]
    ZeroExchangeRate,

    #[error("Fee sink addresses must differ")]
    DuplicateFeeSink,
}
