pub(crate) mod shifts_errors;
pub(crate) mod shifts_model;
pub(crate) mod shifts_repository;
pub(crate) mod shifts_service;
pub(crate) mod shifts_traits;

pub use shifts_errors::ShiftError;
pub(crate) use shifts_errors::Result;
pub use shifts_model::{NewShift, Shift, ShiftDB, ShiftUpdate, UserShiftDB};
pub use shifts_repository::ShiftRepository;
pub use shifts_service::ShiftService;
pub use shifts_traits::{ShiftRepositoryTrait, ShiftServiceTrait};
