// Department salary reporting over a semicolon-delimited staff sheet.

pub mod models;
pub mod report;
