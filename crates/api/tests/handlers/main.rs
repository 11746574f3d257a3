#[path = "../test_utils.rs"]
mod test_utils;

mod client_test;
mod employee_test;
mod middleware_test;
mod service_test;
