pub mod call;
pub mod cta;
