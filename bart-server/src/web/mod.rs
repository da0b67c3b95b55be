//! Web layer: HTTP routes, request/response DTOs, and shared state.

mod dto;
mod routes;
mod state;

pub use dto::{
    AnalyticsQuery, AnalyticsSummaryResponse, ErrorResponse, StationEntry, StationFailure,
    StationWithLines, TotalsResponse, TripEntry, TripRequest,
};
pub use routes::{AppError, create_router};
pub use state::AppState;
