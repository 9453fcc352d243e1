//! Fixed operation costs of providers located in different countries

pub const USA_REWARD: f64 = -1.0;
pub const UK_REWARD: f64 = -6.8;
pub const CHINA_REWARD: f64 = -11.7;
pub const RUSSIA_REWARD: f64 = -9.12;
pub const BRAZIL_REWARD: f64 = -6.7;
pub const BELGIUM_REWARD: f64 = -7.6;
pub const CANADA_REWARD: f64 = -1.8;
pub const AUSTRIA_REWARD: f64 = -8.38;
pub const CHILE_REWARD: f64 = -7.8;
