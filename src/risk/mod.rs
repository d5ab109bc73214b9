//! Qualitative risk scoring (probability x impact)

mod parser;
mod register;
mod scoring;

pub use parser::{parse_risk_list, FIELD_SEPARATOR, ITEM_SEPARATOR};
pub use register::{load_risk_register, read_risk_register};
pub use scoring::{
    categorize, score, score_all, RiskCategory, RiskItem, RiskResult, DEFAULT_RISK_NAME,
};
