
mod request_code_test;
mod router_test;
