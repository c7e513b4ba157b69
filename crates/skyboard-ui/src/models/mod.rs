pub mod card_model;
pub mod dashboard_model;

pub use card_model::{CardState, CardStates};
pub use dashboard_model::{DashboardController, DashboardEvent, DashboardState, Phase};
