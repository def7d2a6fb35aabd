//! Operations exposed on [`super::RuntimeHandle`], grouped by concern.

mod directory;
mod equipment;
mod inventory;
mod maintenance;
mod progression;
mod view;
