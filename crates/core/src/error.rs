use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Item {0} is not available for booking")]
    ItemUnavailable(DbId),

    #[error("Cannot book an item owned by the booker")]
    SelfBooking,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Booking {0} was already approved")]
    AlreadyApproved(DbId),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Bookings were not found")]
    NoBookingsFound,

    #[error("Internal error: {0}")]
    Internal(String),
}
