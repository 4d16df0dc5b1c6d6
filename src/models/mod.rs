pub mod indicator;
pub mod request;
pub mod response;
pub mod validation;

pub use indicator::Indicator;
pub use request::CalculationRequest;
pub use response::CalculationResponse;
pub use validation::ValidationError;
