use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the owner can perform this action")]
    Unauthorized,

    #[error("Invalid amount: must be greater than zero")]
    ZeroAmount,
}
