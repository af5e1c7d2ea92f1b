//! Platform-independent core of the hotel console: entities and DTOs, the
//! generic `Resource` abstraction, declarative validation, list filtering and
//! the page state machine.

pub mod config;
pub mod crud;
pub mod dto;
pub mod error;
pub mod filter;
pub mod form;
pub mod models;
pub mod resource;
pub mod validation;

pub use config::ConsoleConfig;
pub use crud::{CrudAction, CrudState, Notice, NoticeKind, SaveCommand, SaveKind};
pub use dto::{Endpoint, FkRef};
pub use error::ApiError;
pub use filter::{apply_filter, ListFilter, SortDirection};
pub use form::{EntityForm, FieldKind, FieldSpec};
pub use models::*;
pub use resource::{Lookup, Resource};
pub use validation::{FormValidation, PatternKind, Rule, ValidationError};
