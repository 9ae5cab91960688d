pub(crate) mod linkage_errors;
pub(crate) mod linkage_model;
pub(crate) mod linkage_repository;
pub(crate) mod linkage_service;
pub(crate) mod linkage_traits;

pub use linkage_errors::LinkageError;
pub(crate) use linkage_errors::Result;
pub use linkage_model::ShiftDelivery;
pub use linkage_repository::LinkageRepository;
pub use linkage_service::{LinkageMaintainer, LinkageService};
pub use linkage_traits::{LinkageRepositoryTrait, LinkageServiceTrait};
