pub mod api;
pub mod price_points;
pub mod seed;
pub mod ui;
