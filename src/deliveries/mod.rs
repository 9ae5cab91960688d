pub(crate) mod deliveries_errors;
pub(crate) mod deliveries_model;
pub(crate) mod deliveries_repository;
pub(crate) mod deliveries_service;
pub(crate) mod deliveries_traits;

pub use deliveries_errors::DeliveryError;
pub(crate) use deliveries_errors::Result;
pub use deliveries_model::{Delivery, DeliveryApp, DeliveryDB, DeliveryUpdate, NewDelivery, UserDeliveryDB};
pub use deliveries_repository::DeliveryRepository;
pub use deliveries_service::DeliveryService;
pub use deliveries_traits::{DeliveryRepositoryTrait, DeliveryServiceTrait};
