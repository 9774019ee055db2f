use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid value for {param}: {value}")]
    InvalidValue { param: String, value: String },
}
