// Quantized s8 vector-by-matrix kernels for fully-connected layers
pub mod kernels;
pub mod io;

// Re-exports kept minimal; callers go through kernels::vec_mat_mult_t_s8
pub use kernels::{KernelStatus, VecMatParams};
