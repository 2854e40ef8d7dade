// Composition root for the incremental extraction scheduler.
//
// Responsibilities:
// - Read config from arguments and the environment.
// - Instantiate the concrete storage backend.
// - Wire it into the watermark use case handlers.

pub mod cli;
pub mod config;
