//! Execute handlers for the bridge router.
//!
//! - `receive` - CW20 hook that routes incoming transfers
//! - `vaults` - vault registry and fee engine wiring
//! - `admin` - role grants and ownership transfer

mod admin;
mod receive;
mod vaults;

pub use admin::*;
pub use receive::*;
pub use vaults::*;
