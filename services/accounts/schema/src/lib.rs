pub mod accounts;
pub mod one_time_codes;
