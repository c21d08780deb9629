mod request;
mod response;

pub use request::{GeometryRequest, QuoteRequest};
pub use response::{ConstantsResponse, GeometryResponse, HealthResponse, InvalidateResponse, QuoteResponse};
