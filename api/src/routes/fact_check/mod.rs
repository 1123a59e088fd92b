pub mod fact_check_request;
pub mod fact_check_route;
