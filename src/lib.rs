//! This crate provides the todo scheduling core of a personal dashboard.
//!
//! Todos span an inclusive range of calendar dates ([`item::DateRange`]), and are either all-day or have a time range.
//! The [`schedule`] module tells which todos are active on a date, and how a todo moves when it is dragged to another date.
//!
//! Calendar views (daily, weekly, monthly) live in the [`calendar`] module. They own no todo: they derive what they show from
//! the list held by a [`TodoStore`](store::TodoStore).
//!
//! The store is the single owner of the todos. It mirrors a remote [`TodoSource`](traits::TodoSource), usually the REST
//! [`Client`](client::Client), applying `update`s and `remove`s optimistically and reconciling with the server when they fail.

pub mod traits;
pub mod config;
pub mod error;

pub mod item;
pub use item::{DateRange, Schedule, TodoId};
pub mod todo;
pub use todo::{Todo, TodoFields, TodoPatch};
pub mod draft;
pub use draft::TodoDraft;
pub mod schedule;
pub mod calendar;
pub use calendar::view::CalendarView;

pub mod wire;
pub mod client;
pub mod store;
pub use store::TodoStore;

pub mod storage;
pub mod preferences;

pub mod mock_behaviour;
pub mod mock_remote;

pub mod utils;

/// A store synced with the REST server
pub type RemoteTodoStore = TodoStore<client::Client>;
