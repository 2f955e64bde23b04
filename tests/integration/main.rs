mod config_loading;
mod error_handling;
mod scenario_runtime;
