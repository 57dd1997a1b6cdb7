pub mod mapper;
pub mod type_utils;

pub use mapper::{TypeMapper, TypeMapperBuilder, TypeMapping};
