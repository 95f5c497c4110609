//! Domain definitions.

pub mod bill;
pub mod call;
pub mod contract;
pub mod line;
pub mod tariff;

pub use self::{
    bill::Bill, call::Call, contract::Contract, line::Line, tariff::Tariffs,
};
