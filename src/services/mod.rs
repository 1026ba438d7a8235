// Services
// Coordinators consumed by the presentation layer, plus settings and diagnostics.

pub mod diagnostics;
pub mod position_coordinator;
pub mod search_coordinator;
pub mod settings_engine;
