// State managers
// Managers own the ordering and write rules over a store.

pub mod history_manager;
