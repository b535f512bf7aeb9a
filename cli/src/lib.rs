pub mod pipeline;
pub mod svsim_commands;
