pub mod batch_converter;

pub use batch_converter::BatchConverter;
