pub mod sir_states;
pub use sir_states::*;

pub mod contact_network;
pub use contact_network::*;

pub mod network_options;
pub use network_options::*;

pub mod trajectory;
pub use trajectory::*;

pub mod propagation;
pub use propagation::*;

pub mod sir_writer;
pub use sir_writer::*;
