//! The admin screen: a view-state controller plus the list and form panels
//! it switches between.

pub mod controller;
pub mod form;
pub mod grid;
pub mod render;
pub mod session;

pub use self::controller::{Controller, ControllerError, Draft, Mode, Submission};
pub use self::form::FormView;
pub use self::grid::{GridView, Pager};
pub use self::session::Session;
