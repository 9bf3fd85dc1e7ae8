// Analyzers over loaded squads and match histories. Everything here is pure:
// callers load data through scouty-core and serialize the returned reports.

pub mod insights;
pub mod junior;
pub mod matches;
pub mod snapshot;
pub mod training;
