mod wide_int_error;
mod wide_int_value;

pub use wide_int_error::WideIntError;
pub use wide_int_value::WideInt;
