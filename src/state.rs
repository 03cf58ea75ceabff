use crate::config::Config;
use crate::domain::ports::{AvailabilityRepository, BookingRepository, EventTypeRepository};
use crate::domain::services::booking_service::BookingService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_type_repo: Arc<dyn EventTypeRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
}
