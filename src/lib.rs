// Library so integration tests can access modules

pub mod chart;
pub mod config;
pub mod log_repo;
pub mod models;
pub mod router_repo;
pub mod series;
